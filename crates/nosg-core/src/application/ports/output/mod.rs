//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `nosg-adapters` crate provides implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::generator::Generator;
use crate::domain::{Component, FileMap, GenerateReport, LogLevel, WriteOptions};
use crate::error::NosgResult;

/// Port for filesystem pattern matching.
///
/// Implemented by:
/// - `nosg_adapters::GlobPatternMatcher` (globset + walkdir)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatternMatcher: Send + Sync {
    /// Absolute paths of the regular files matching `pattern`.
    ///
    /// No match is an empty list, not an error.
    async fn find_files(&self, pattern: &str) -> NosgResult<Vec<PathBuf>>;
}

/// Port turning a component file into a [`Component`].
///
/// Implemented by:
/// - `nosg_adapters::ManifestComponentLoader` (TOML manifests)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> NosgResult<Component>;
}

/// Port turning a component's generator declaration into a callable.
///
/// Implemented by:
/// - `nosg_adapters::GeneratorRegistry`
pub trait GeneratorFactory: Send + Sync {
    /// Fails with `InvalidGeneratorReference` when the component declares
    /// no generator.
    fn build(&self, component: &Component) -> NosgResult<Arc<dyn Generator>>;
}

/// Port for persisting generated files.
///
/// One engine is shared by every run of a process; implementations must be
/// safe to call concurrently.
///
/// Implemented by:
/// - `nosg_adapters::LocalGenerateEngine` (tokio::fs)
/// - `nosg_adapters::MemoryGenerateEngine` (testing)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerateEngine: Send + Sync {
    async fn write(&self, files: FileMap, options: WriteOptions) -> NosgResult<GenerateReport>;
}

/// Port for user-facing leveled log lines.
///
/// Implemented by:
/// - `nosg_adapters::WriterSink` / `nosg_adapters::MemorySink`
/// - the CLI's `OutputManager`
pub trait LogSink: Send + Sync {
    fn write_line(&self, level: LogLevel, message: &str);

    fn log(&self, message: &str) {
        self.write_line(LogLevel::Log, message);
    }

    fn notice(&self, message: &str) {
        self.write_line(LogLevel::Notice, message);
    }

    fn warn(&self, message: &str) {
        self.write_line(LogLevel::Warn, message);
    }

    fn success(&self, message: &str) {
        self.write_line(LogLevel::Success, message);
    }
}

/// Discards everything. Used when no sink is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write_line(&self, _level: LogLevel, _message: &str) {}
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_line(&self, level: LogLevel, message: &str) {
        (**self).write_line(level, message);
    }
}
