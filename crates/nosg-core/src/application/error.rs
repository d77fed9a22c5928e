//! Application layer errors.
//!
//! These errors represent failures while looking things up on disk or while
//! running a generator. Malformed inputs are `DomainError`s.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::messages;
use crate::error::ErrorCategory;

/// Why a component path did not resolve to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    NoMatch,
    /// Every candidate, sorted.
    AmbiguousMatch(Vec<PathBuf>),
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("{}", sources_not_found(.path, .relative))]
    SourcesDirectoryNotFound { path: PathBuf, relative: bool },

    #[error("{}", sources_not_a_directory(.path, .relative))]
    SourcesDirectoryNotADirectory { path: PathBuf, relative: bool },

    #[error("{}", component_not_found(.component_path, .reason, .relative))]
    ComponentNotFound {
        component_path: String,
        reason: NotFoundReason,
        relative: bool,
    },

    #[error("Cannot load component at \"{}\": {reason}", .path.display())]
    ComponentLoadFailed { path: PathBuf, reason: String },

    #[error("{}", never_called(.program, .command, .generator, .timeout_ms))]
    GeneratorTimeoutNeverCalled {
        program: String,
        command: String,
        generator: String,
        timeout_ms: u128,
    },

    #[error("{}", never_finished(.program, .command, .generator, .timeout_ms))]
    GeneratorTimeoutNeverFinished {
        program: String,
        command: String,
        generator: String,
        timeout_ms: u128,
    },

    #[error("The generator \"{generator}\" called generate more than once")]
    GenerateAlreadyCalled { generator: String },

    #[error("File generation failed: {reason}")]
    GenerateFailed { reason: String },

    #[error("Unknown generator \"{id}\"")]
    UnknownGenerator { id: String, available: Vec<String> },

    #[error("Invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("I/O error at \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

fn sources_not_found(path: &Path, relative: &bool) -> String {
    messages::unexistent_sources_directory(path, *relative)
}

fn never_called(program: &str, command: &str, generator: &str, timeout_ms: &u128) -> String {
    messages::generate_not_called_timeout(program, command, generator, *timeout_ms)
}

fn never_finished(program: &str, command: &str, generator: &str, timeout_ms: &u128) -> String {
    messages::generate_not_finished_timeout(program, command, generator, *timeout_ms)
}

fn sources_not_a_directory(path: &Path, relative: &bool) -> String {
    messages::not_a_directory_sources_directory(path, *relative)
}

fn component_not_found(component_path: &str, reason: &NotFoundReason, relative: &bool) -> String {
    let detail = match reason {
        NotFoundReason::NoMatch => messages::no_filepath_matching(component_path),
        NotFoundReason::AmbiguousMatch(paths) => {
            messages::many_filepaths_matching(component_path, paths)
        }
    };
    messages::component_not_found(component_path, &detail, *relative)
}

impl ApplicationError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SourcesDirectoryNotFound { .. } | Self::SourcesDirectoryNotADirectory { .. } => {
                vec![
                    "Pass --sources-directory <path> or set sources.directory in nosg.toml".into(),
                    "Try: nosg check-sources-directory".into(),
                ]
            }
            Self::ComponentNotFound {
                reason: NotFoundReason::NoMatch,
                component_path,
                ..
            } => vec![
                format!("Try: nosg list-matching-filepaths {component_path}"),
                "Check the component file extension in sources.extension".into(),
            ],
            Self::ComponentNotFound {
                reason: NotFoundReason::AmbiguousMatch(_),
                ..
            } => vec![
                "Add more segments to the component path (set/layer/component)".into(),
                "Or restrict the lookup with --layer <name>".into(),
            ],
            Self::ComponentLoadFailed { path, .. } => vec![format!(
                "Check the TOML syntax of {}",
                path.display()
            )],
            Self::GeneratorTimeoutNeverCalled { .. }
            | Self::GeneratorTimeoutNeverFinished { .. } => vec![
                "Increase the timeout with --timeout <ms>".into(),
                "Or set generator.timeout_ms in nosg.toml".into(),
            ],
            Self::UnknownGenerator { available, .. } => vec![format!(
                "Available generators: {}",
                available.join(", ")
            )],
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourcesDirectoryNotFound { .. }
            | Self::ComponentNotFound { .. }
            | Self::UnknownGenerator { .. } => ErrorCategory::NotFound,
            Self::SourcesDirectoryNotADirectory { .. }
            | Self::ComponentLoadFailed { .. }
            | Self::InvalidPattern { .. } => ErrorCategory::Validation,
            Self::GeneratorTimeoutNeverCalled { .. }
            | Self::GeneratorTimeoutNeverFinished { .. } => ErrorCategory::Timeout,
            Self::GenerateAlreadyCalled { .. } | Self::GenerateFailed { .. } | Self::Io { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
