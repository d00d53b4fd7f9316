//! Fatal build errors.
//!
//! Anything recoverable (an unknown field kind, an empty slice zone) is a
//! [`crate::diagnostics::Diagnostic`] instead and never shows up here.
use thiserror::Error;

use crate::definition::FieldPath;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Required nested structure is missing or has the wrong JSON shape.
    #[error("malformed definition at {path}: {reason}")]
    MalformedDefinition { path: FieldPath, reason: String },

    /// Two distinct origins produced the same type name.
    #[error("type name `{name}` generated by both {first} and {second}")]
    NamingCollision {
        name: String,
        first: String,
        second: String,
    },

    /// Input could not be parsed as JSON.
    #[error("at JSON path {path} → {message}")]
    Json { path: String, message: String },
}

impl SchemaError {
    pub(crate) fn malformed(path: &FieldPath, reason: impl Into<String>) -> Self {
        SchemaError::MalformedDefinition {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}
