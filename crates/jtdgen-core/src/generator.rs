//! The generation pass: schema model in, rendered source files out.

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult};
use crate::ir::{GeneratedType, TypeId};
use crate::mapper::{TypeArena, TypeMapper};
use crate::registry::NameRegistry;
use crate::schema::SchemaModel;
use crate::state::DefinitionState;
use crate::target::{RenderContext, Target};

/// One rendered source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the output root
    pub path: String,
    pub contents: String,
}

/// Everything a generation pass produced, ready for a file writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub files: Vec<OutputFile>,
}

impl GeneratedOutput {
    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Mapped, strategy-selected and named types awaiting rendering.
#[derive(Debug)]
pub struct GenerationPlan {
    types: TypeArena,
    registry: NameRegistry,
    config: GeneratorConfig,
}

impl GenerationPlan {
    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Look up a generated type by its resolved identifier.
    pub fn type_named(&self, identifier: &str) -> Option<&GeneratedType> {
        self.types.iter().find(|t| t.identifier == identifier)
    }

    /// Render every type and mark it emitted.
    ///
    /// Output is returned only if every type renders.
    pub fn render<T: Target + ?Sized>(mut self, target: &T) -> CodegenResult<GeneratedOutput> {
        let mut files = Vec::with_capacity(self.types.len());
        {
            let ctx = RenderContext::new(&self.types, &self.registry, &self.config);
            for index in 0..self.types.len() {
                let id = TypeId::new(index);
                let ty = self.types.get(id).ok_or_else(|| {
                    CodegenError::invariant(format!("<type {index}>"), "type was never mapped")
                })?;
                if !self.types.state(id).is_some_and(|s| s.is_renderable()) {
                    return Err(CodegenError::invariant(
                        &ty.schema_name,
                        "type rendered before its names were reserved",
                    ));
                }

                let contents = target.render(&ctx, ty)?;
                files.push(OutputFile {
                    path: target.file_name(ty),
                    contents,
                });
            }
        }

        for index in 0..self.types.len() {
            self.types
                .advance(TypeId::new(index), DefinitionState::Emitted)?;
        }

        tracing::info!(files = files.len(), target = target.name(), "Generation pass complete");
        Ok(GeneratedOutput { files })
    }
}

/// Runs generation passes for one target.
pub struct Generator<T: Target> {
    target: T,
    config: GeneratorConfig,
}

impl<T: Target> Generator<T> {
    pub fn new(target: T, config: GeneratorConfig) -> Self {
        Self { target, config }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Map every definition and reserve all names, without rendering.
    pub fn plan(&self, model: &SchemaModel) -> CodegenResult<GenerationPlan> {
        self.config.validate()?;
        tracing::info!(
            definitions = model.len(),
            target = self.target.name(),
            "Starting generation pass"
        );

        let (types, registry) = TypeMapper::new(model, &self.config, self.target.naming()).map_all()?;
        Ok(GenerationPlan {
            types,
            registry,
            config: self.config.clone(),
        })
    }

    /// Run a full pass: plan, then render.
    pub fn generate(&self, model: &SchemaModel) -> CodegenResult<GeneratedOutput> {
        let result = self.plan(model).and_then(|plan| plan.render(&self.target));
        if let Err(err) = &result {
            tracing::error!(
                error = %err,
                definition = err.definition().unwrap_or("<none>"),
                "Generation pass failed"
            );
        }
        result
    }
}

#[cfg(test)]
#[path = "generator/generator_tests.rs"]
mod generator_tests;
