//! Error types for generation

use thiserror::Error;

use crate::validate::MissingField;

/// Error raised while producing a snippet or options object
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// `dict` and/or `anim` were blank
    #[error("Missing required fields: {}", .0.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(", "))]
    MissingRequiredFields(Vec<MissingField>),
    /// Form JSON could not be parsed
    #[error("Invalid form: {0}")]
    Form(#[from] serde_json::Error),
    /// Form could not be read
    #[error("Failed to read form: {0}")]
    Io(#[from] std::io::Error),
    /// A `--set` style assignment without `=`
    #[error("Invalid field assignment '{0}' (expected id=value)")]
    Assignment(String),
    /// A prop override addressing a block past the end
    #[error("Prop index in '{id}' is out of range ({props} prop blocks; the next index appends)")]
    PropIndex { id: String, props: usize },
}

impl From<Vec<MissingField>> for GenerateError {
    fn from(missing: Vec<MissingField>) -> Self {
        GenerateError::MissingRequiredFields(missing)
    }
}
