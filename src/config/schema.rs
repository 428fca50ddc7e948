//! Configuration schema types for `propanim.toml`
//!
//! Defines the structure and validation rules for generator configuration.

use serde::{Deserialize, Serialize};

/// Snippet dialect: the names the generated call is spelled with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// Name of the called function
    #[serde(default = "default_function")]
    pub function: String,
    /// Implicit leading argument (the animated entity)
    #[serde(default = "default_target")]
    pub target: String,
    /// Constructor used for coordinate and rotation triples
    #[serde(default = "default_vector")]
    pub vector: String,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self { function: default_function(), target: default_target(), vector: default_vector() }
    }
}

fn default_function() -> String {
    "play_animation".to_string()
}

fn default_target() -> String {
    "PlayerPedId()".to_string()
}

fn default_vector() -> String {
    "vector3".to_string()
}

/// CLI output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: default_pretty() }
    }
}

fn default_pretty() -> bool {
    true
}

/// Complete propanim.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropanimConfig {
    /// Snippet dialect
    #[serde(default)]
    pub snippet: SnippetConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "snippet.function")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "propanim.toml: '{}' {}", self.field, self.message)
    }
}

impl PropanimConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let names = [
            ("snippet.function", &self.snippet.function),
            ("snippet.target", &self.snippet.target),
            ("snippet.vector", &self.snippet.vector),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a non-empty string".to_string(),
                });
            }
        }

        errors
    }
}
