// ============================================================================
// domain/error.rs - INPUT SHAPE ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::messages;
use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Domain errors describe values that are malformed before any I/O happens.
/// They are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid component path \"{path}\": {reason}")]
    InvalidComponentPath { path: String, reason: String },

    #[error("{}", messages::invalid_option_shape(.value, .kind))]
    InvalidOptionShape { value: String, kind: &'static str },

    #[error("Options are not valid JSON: {reason}")]
    MalformedOptions { reason: String },

    #[error("{}", messages::invalid_generator(.value, .kind))]
    InvalidGeneratorReference { value: String, kind: &'static str },

    #[error("Generator \"{generator}\" requires the option \"{key}\"")]
    MissingOption { generator: String, key: String },

    #[error("Invalid layer name \"{0}\": a layer is a single path segment")]
    InvalidLayer(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidComponentPath { .. } => vec![
                "Component paths look like set/layer/component, layer/component,".into(),
                "set:component or component".into(),
            ],
            Self::InvalidOptionShape { .. } | Self::MalformedOptions { .. } => vec![
                "Options must be a JSON object, e.g. --options '{\"name\": \"view\"}'".into(),
            ],
            Self::InvalidGeneratorReference { .. } => vec![
                "Pass a component path to a component declaring a [generator] table".into(),
                "Try: nosg get-component <path> to inspect what the path resolves to".into(),
            ],
            Self::MissingOption { key, .. } => vec![format!(
                "Add it to the options: --options '{{\"{key}\": \"...\"}}'"
            )],
            Self::InvalidLayer(_) => vec!["Layer names cannot contain '/'".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
