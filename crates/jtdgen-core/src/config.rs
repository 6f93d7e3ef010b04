//! Generator configuration types

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};

/// Configuration for a single generation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Namespace (or package/module) the generated declarations live in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Type name given to the root schema when it is not the empty form
    #[serde(default = "default_root_name")]
    pub root_name: String,

    /// Candidate name for nested converter units, cased and escaped as a
    /// type name by the target
    #[serde(default = "default_converter_name")]
    pub converter_name: String,

    /// Candidate name for the single member of a wrapper type, cased and
    /// escaped as a member name by the target
    #[serde(default = "default_wrapper_member_name")]
    pub wrapper_member_name: String,

    /// Maximum recursion depth while mapping schemas
    ///
    /// Legitimate ref cycles never approach this; it guards against
    /// pathological inline nesting.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Highest numeric suffix the name registry may append (unbounded if unset)
    #[serde(default)]
    pub max_name_suffix: Option<u32>,
}

fn default_namespace() -> String {
    "JtdCodegenE2E".to_string()
}

fn default_root_name() -> String {
    "Root".to_string()
}

fn default_converter_name() -> String {
    "JsonConverter".to_string()
}

fn default_wrapper_member_name() -> String {
    "Value".to_string()
}

fn default_max_depth() -> usize {
    128
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            root_name: default_root_name(),
            converter_name: default_converter_name(),
            wrapper_member_name: default_wrapper_member_name(),
            max_depth: default_max_depth(),
            max_name_suffix: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> CodegenResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from a TOML document
    pub fn from_toml(content: &str) -> CodegenResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the target namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the root type name
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    /// Bound the registry's disambiguation suffixes
    pub fn with_max_name_suffix(mut self, max: u32) -> Self {
        self.max_name_suffix = Some(max);
        self
    }

    /// Set the mapping depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> CodegenResult<()> {
        let names = [
            ("namespace", &self.namespace),
            ("root_name", &self.root_name),
            ("converter_name", &self.converter_name),
            ("wrapper_member_name", &self.wrapper_member_name),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(CodegenError::ConfigError(format!(
                    "{field} cannot be empty"
                )));
            }
        }

        if self.max_depth == 0 {
            return Err(CodegenError::ConfigError(
                "max_depth must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
