//! The seam between the generation core and a target language.

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult};
use crate::ir::{GeneratedType, TypeId};
use crate::mapper::TypeArena;
use crate::naming::NamingConvention;
use crate::registry::NameRegistry;

/// A target language the generator can render declarations for.
pub trait Target {
    /// Short target name used in logs
    fn name(&self) -> &str;

    /// Casing and reserved words for identifiers in this language
    fn naming(&self) -> &NamingConvention;

    /// Output path for a generated type, relative to the output root
    fn file_name(&self, ty: &GeneratedType) -> String;

    /// Render one generated type (and its converter, if any) as a complete
    /// source unit
    fn render(&self, ctx: &RenderContext<'_>, ty: &GeneratedType) -> CodegenResult<String>;
}

/// Read-only view of a finished plan, handed to [`Target::render`].
pub struct RenderContext<'a> {
    types: &'a TypeArena,
    registry: &'a NameRegistry,
    config: &'a GeneratorConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(types: &'a TypeArena, registry: &'a NameRegistry, config: &'a GeneratorConfig) -> Self {
        Self {
            types,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    pub fn registry(&self) -> &'a NameRegistry {
        self.registry
    }

    /// Resolve a referenced type while rendering `from`.
    ///
    /// A missing or unnamed type means an earlier stage is broken.
    pub fn get(&self, id: TypeId, from: &GeneratedType) -> CodegenResult<&'a GeneratedType> {
        match self.types.get(id) {
            Some(ty) if !ty.identifier.is_empty() => Ok(ty),
            Some(_) => Err(CodegenError::invariant(
                &from.schema_name,
                format!("type {} has no reserved identifier", id.index()),
            )),
            None => Err(CodegenError::invariant(
                &from.schema_name,
                format!("reference to unknown type {}", id.index()),
            )),
        }
    }

    /// Identifier of a referenced type.
    pub fn identifier(&self, id: TypeId, from: &GeneratedType) -> CodegenResult<&'a str> {
        self.get(id, from).map(|t| t.identifier.as_str())
    }
}
