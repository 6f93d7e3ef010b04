//! jtdgen-csharp - C# / System.Text.Json target for jtdgen
//!
//! Renders the types planned by `jtdgen-core` as C# classes and enums,
//! annotated for `System.Text.Json`. Wrappers and discriminated unions get a
//! nested `JsonConverter<T>` subclass; records and enums rely on the
//! library's default handling.

pub mod keywords;
pub mod render;
pub mod types;

use jtdgen_core::{Case, CodegenResult, GeneratedType, NamingConvention, RenderContext, Target};

pub use types::{CSharpType, map_primitive};

/// The C# target.
#[derive(Debug, Clone)]
pub struct CSharpTarget {
    naming: NamingConvention,
}

impl CSharpTarget {
    pub fn new() -> Self {
        let naming = NamingConvention::new(
            Case::Pascal,
            Case::Pascal,
            Case::Pascal,
            keywords::KEYWORDS.iter().copied(),
        )
        .with_reserved_type_names(keywords::RESERVED_TYPE_NAMES.iter().copied());
        Self { naming }
    }
}

impl Default for CSharpTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Target for CSharpTarget {
    fn name(&self) -> &str {
        "csharp"
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn file_name(&self, ty: &GeneratedType) -> String {
        format!("{}.cs", ty.identifier)
    }

    fn render(&self, ctx: &RenderContext<'_>, ty: &GeneratedType) -> CodegenResult<String> {
        render::render_type(ctx, ty)
    }
}
