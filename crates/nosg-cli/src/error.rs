//! Errors surfaced by the `nosg` binary and their exit codes.
//!
//! Core failures pass through untouched inside [`CliError::Core`]; the CLI
//! only adds configuration and I/O failures of its own.

use std::error::Error as _;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use nosg_core::domain::DomainError;
use nosg_core::error::{ErrorCategory, NosgError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration could not be loaded, encoded or looked up.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] NosgError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Process exit status, one per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Internal = 1,
    Usage = 2,
    NotFound = 3,
    Config = 4,
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            context: format!("I/O error: {source}"),
            source,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Core(err.into())
    }
}

impl CliError {
    pub fn config(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config { .. } => vec![
                "Show which file is read with: nosg config path".into(),
                "Regenerate it with: nosg init --force".into(),
                "Remember that NOSG_* variables override the file".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Io { .. } => vec!["Check that the path exists and is writable".into()],
        }
    }

    /// Generator timeouts count as internal failures, not usage errors.
    pub fn status(&self) -> ExitStatus {
        match self {
            Self::Config { .. } => ExitStatus::Config,
            Self::Io { .. } => ExitStatus::Internal,
            Self::Core(core) => match core.category() {
                ErrorCategory::Validation => ExitStatus::Usage,
                ErrorCategory::NotFound => ExitStatus::NotFound,
                ErrorCategory::Timeout | ErrorCategory::Internal => ExitStatus::Internal,
            },
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status() as u8
    }

    /// Message, cause chain (verbose only) and suggestions, ready for
    /// stderr. `styled` turns on ANSI colours.
    pub fn render(&self, verbose: bool, styled: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if styled { style(text) } else { text.to_owned() }
        };
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", paint("Error:", |t: &str| t.red().bold().to_string()));
        for line in self.to_string().lines() {
            let _ = writeln!(out, "  {}", paint(line, |t: &str| t.red().to_string()));
        }

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(&format!("caused by: {err}"), |t: &str| t.dimmed().to_string())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", paint("Try:", |t: &str| t.yellow().bold().to_string()));
            for hint in suggestions {
                let _ = writeln!(out, "  - {hint}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Run again with -v for the full cause chain.", |t: &str| {
                    t.dimmed().to_string()
                })
            );
        }
        out
    }

    pub fn log(&self) {
        match self.status() {
            ExitStatus::Usage | ExitStatus::NotFound => {
                tracing::warn!(error = %self, "command failed");
            }
            ExitStatus::Config | ExitStatus::Internal => {
                tracing::error!(error = %self, "command failed");
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "underlying cause");
        }
    }
}

/// Attach a context message to foreign errors at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Io {
            context: f().into(),
            source,
        })
    }
}

impl<T> IntoCli<T> for anyhow::Result<T> {
    /// The whole `anyhow` chain goes into the message; the error itself is
    /// kept as the source.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::Config {
            message: format!("{}: {e:#}", f().into()),
            source: Some(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use nosg_core::application::{ApplicationError, NotFoundReason};

    fn missing_component() -> CliError {
        CliError::Core(
            ApplicationError::ComponentNotFound {
                component_path: "button".into(),
                reason: NotFoundReason::NoMatch,
                relative: true,
            }
            .into(),
        )
    }

    fn disk_failure() -> CliError {
        CliError::Io {
            context: "writing nosg.toml".into(),
            source: io::Error::other("disk full"),
        }
    }

    #[test]
    fn invalid_input_exits_with_2() {
        let err: CliError = DomainError::InvalidLayer("a/b".into()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_component_exits_with_3() {
        assert_eq!(missing_component().exit_code(), 3);
    }

    #[test]
    fn configuration_exits_with_4() {
        let err = CliError::config("broken", io::Error::other("parse"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn io_exits_with_1() {
        assert_eq!(disk_failure().exit_code(), 1);
    }

    #[test]
    fn generator_timeout_is_internal() {
        let err = CliError::Core(
            ApplicationError::GeneratorTimeoutNeverCalled {
                program: "nosg".into(),
                command: "run-generator".into(),
                generator: "gen".into(),
                timeout_ms: 100,
            }
            .into(),
        );
        assert_eq!(err.status(), ExitStatus::Internal);
    }

    #[test]
    fn unstyled_render_has_no_escapes() {
        let text = missing_component().render(false, false);
        assert!(text.contains("Error:"));
        assert!(text.contains("button"));
        assert!(text.contains("-v"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_walks_the_cause_chain() {
        let text = disk_failure().render(true, false);
        assert!(text.contains("caused by: disk full"));
        assert!(!text.contains("Run again with -v"));
    }

    #[test]
    fn io_context_is_the_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_cli_context(|| "reading config").unwrap_err();
        assert_eq!(err.to_string(), "reading config");
    }

    #[test]
    fn anyhow_chain_becomes_a_config_error() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("bad toml"));
        let err = result.with_cli_context(|| "loading nosg.toml").unwrap_err();
        let CliError::Config { message, .. } = err else {
            panic!("expected a configuration error");
        };
        assert_eq!(message, "loading nosg.toml: bad toml");
    }
}
