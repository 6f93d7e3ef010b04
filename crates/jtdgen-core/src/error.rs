//! Error types for jtdgen generation passes

use thiserror::Error;

/// Result type alias for generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for generation operations
///
/// Every variant aborts the whole generation pass. Generation is pure and
/// deterministic, so none of them are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// A ref names a definition that is absent from the schema
    #[error("unresolved reference: `{from}` refers to missing definition `{name}`")]
    UnresolvedReference { name: String, from: String },

    /// Mapping recursed deeper than the configured limit
    #[error("schema nesting too deep in `{definition}`: depth {depth} exceeds limit {limit}")]
    SchemaCycleDepthExceeded {
        definition: String,
        depth: usize,
        limit: usize,
    },

    /// Disambiguation suffixes ran out for a candidate name
    #[error("name registry exhausted for `{candidate}` after {attempts} attempts")]
    NameRegistryExhausted { candidate: String, attempts: u32 },

    /// An earlier stage left the model inconsistent
    #[error("internal invariant violated in `{definition}`: {detail}")]
    InternalInvariantViolation { definition: String, detail: String },

    /// The schema document is not a well-formed JTD schema
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Generator configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl CodegenError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            CodegenError::UnresolvedReference { .. } => 1,
            CodegenError::SchemaCycleDepthExceeded { .. } => 2,
            CodegenError::NameRegistryExhausted { .. } => 3,
            CodegenError::InternalInvariantViolation { .. } => 4,
            CodegenError::InvalidSchema(_) => 5,
            CodegenError::ConfigError(_) => 6,
            CodegenError::SerializationError(_) => 7,
        }
    }

    /// The schema definition this error is attributed to, if any
    pub fn definition(&self) -> Option<&str> {
        match self {
            CodegenError::UnresolvedReference { from, .. } => Some(from),
            CodegenError::SchemaCycleDepthExceeded { definition, .. }
            | CodegenError::InternalInvariantViolation { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// Whether the error points at a bug in jtdgen rather than at the input
    pub fn is_internal(&self) -> bool {
        matches!(self, CodegenError::InternalInvariantViolation { .. })
    }

    /// Shorthand for [`CodegenError::InternalInvariantViolation`]
    pub fn invariant(definition: impl Into<String>, detail: impl Into<String>) -> Self {
        CodegenError::InternalInvariantViolation {
            definition: definition.into(),
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for CodegenError {
    fn from(err: toml::de::Error) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
