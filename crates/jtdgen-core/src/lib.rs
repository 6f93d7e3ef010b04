//! jtdgen-core - Generation core for JSON Type Definition code generators
//!
//! This crate turns a JTD schema into target-independent generated types and
//! drives a [`Target`] to render them:
//! - [`SchemaModel`] for the loaded schema
//! - [`TypeMapper`] for cycle-safe ref resolution
//! - [`StrategySelector`] for default vs. custom serialization
//! - [`NameRegistry`] for scoped, deterministic identifiers
//! - [`Generator`] for running a whole pass
//!
//! # Architecture
//!
//! ```text
//! SchemaModel
//!     ↓
//!  [TypeMapper] ──→ [StrategySelector] ──→ [NameRegistry]
//!     ↓
//!  GenerationPlan
//!     ↓
//!  [Target::render] → GeneratedOutput
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod ir;
pub mod mapper;
pub mod naming;
pub mod registry;
pub mod schema;
pub mod state;
pub mod strategy;
pub mod target;

pub use config::GeneratorConfig;
pub use error::{CodegenError, CodegenResult};
pub use generator::{GeneratedOutput, GenerationPlan, Generator, OutputFile};
pub use ir::{
    ConverterUnit, EnumMember, GeneratedType, Member, ReadLogic, TypeId, TypeKind, TypeOrigin,
    TypeRef, UnionVariant, VariantOf, WriteLogic,
};
pub use mapper::{TypeArena, TypeMapper};
pub use naming::{Case, NamingConvention};
pub use registry::{NameKey, NameRegistry, ScopeId, SharedNameRegistry};
pub use schema::{DefId, Definition, Form, Primitive, Schema, SchemaModel};
pub use state::DefinitionState;
pub use strategy::{SerializationStrategy, StrategyReason, StrategySelector};
pub use target::{RenderContext, Target};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CodegenError, CodegenResult, GeneratedOutput, GeneratedType, Generator, GeneratorConfig,
        RenderContext, Schema, SchemaModel, SerializationStrategy, Target, TypeKind, TypeRef,
    };
}
