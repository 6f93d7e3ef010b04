//! # jtdgen
//!
//! Generate target-language type declarations, plus the serialization logic
//! they need, from a JSON Type Definition (JTD) schema.
//!
//! Every definition becomes one generated type. Types whose JSON shape cannot
//! come from member-wise serialization (thin wrappers around another type,
//! discriminated unions) get a nested custom converter, and every identifier
//! is reserved in a scoped name registry so collisions resolve the same way
//! on every run.
//!
//! ## Quick Start
//!
//! ```
//! use jtdgen::{GeneratorConfig, generate_csharp};
//!
//! let schema = r#"{"definitions": {"Bar": {"properties": {}}, "Foo": {"ref": "Bar"}}}"#;
//! let output = generate_csharp(schema, GeneratorConfig::default()).unwrap();
//!
//! let foo = output.file("Foo.cs").unwrap();
//! assert!(foo.contents.contains("[JsonConverter(typeof(Foo.JsonConverter))]"));
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`jtdgen_core`] - Schema model, type mapping, strategy selection, naming, the generation pass
//! - [`jtdgen_csharp`] - The C# / System.Text.Json target

pub mod logging;

// Re-export core types
pub use jtdgen_core::{
    Case, CodegenError, CodegenResult, ConverterUnit, DefId, Definition, DefinitionState,
    EnumMember, Form, GeneratedOutput, GeneratedType, GenerationPlan, Generator, GeneratorConfig,
    Member, NameKey, NameRegistry, NamingConvention, OutputFile, Primitive, ReadLogic,
    RenderContext, Schema, SchemaModel, ScopeId, SerializationStrategy, SharedNameRegistry,
    StrategyReason, StrategySelector, Target, TypeArena, TypeId, TypeKind, TypeMapper, TypeOrigin,
    TypeRef, UnionVariant, VariantOf, WriteLogic,
};

// Re-export targets
pub use jtdgen_csharp::CSharpTarget;

/// Generate C# declarations for a JTD document.
pub fn generate_csharp(schema_json: &str, config: GeneratorConfig) -> CodegenResult<GeneratedOutput> {
    let model = SchemaModel::from_json(schema_json)?;
    Generator::new(CSharpTarget::new(), config).generate(&model)
}

/// Generate C# declarations for an already-parsed JTD document.
pub fn generate_csharp_from_value(
    schema: serde_json::Value,
    config: GeneratorConfig,
) -> CodegenResult<GeneratedOutput> {
    let model = SchemaModel::from_value(schema)?;
    Generator::new(CSharpTarget::new(), config).generate(&model)
}

/// Prelude module for convenient imports.
///
/// Use `use jtdgen::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        CSharpTarget, CodegenError, CodegenResult, GeneratedOutput, Generator, GeneratorConfig,
        SchemaModel, Target, generate_csharp,
    };
}
