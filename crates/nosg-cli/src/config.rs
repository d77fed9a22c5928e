//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `NOSG_*` environment variables, `__` between nested keys
//!    (`NOSG_SOURCES__DIRECTORY`, `NOSG_GENERATOR__TIMEOUT_MS`)
//! 3. Config file: `--config`, else `./nosg.toml`, else the platform
//!    config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use nosg_core::application::services::{DEFAULT_SOURCES_DIRECTORY, DEFAULT_TIMEOUT};
use nosg_core::domain::{DEFAULT_INDEX_NAME, DEFAULT_SOURCE_EXTENSION, SourceConventions};

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = "nosg.toml";

const ENV_PREFIX: &str = "NOSG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub sources: SourcesConfig,
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Used when a command gets no `--sources-directory`.
    pub directory: PathBuf,
    /// Component file extension, without the dot.
    pub extension: String,
    /// File stem of directory components.
    pub index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig {
                directory: PathBuf::from(DEFAULT_SOURCES_DIRECTORY),
                extension: DEFAULT_SOURCE_EXTENSION.into(),
                index: DEFAULT_INDEX_NAME.into(),
            },
            generator: GeneratorConfig {
                timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// only read when present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = Self::discovered_path() {
                    builder = builder.add_source(File::from(path).format(FileFormat::Toml));
                }
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Conventions component files follow.
    pub fn conventions(&self) -> SourceConventions {
        SourceConventions::new(self.sources.extension.clone(), self.sources.index.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.generator.timeout_ms)
    }

    /// The file [`load`](Self::load) reads, if any.
    pub fn active_path(config_file: Option<&Path>) -> Option<PathBuf> {
        match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discovered_path(),
        }
    }

    /// Path of the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `nosg.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "nosg", "nosg")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    fn discovered_path() -> Option<PathBuf> {
        [PathBuf::from(LOCAL_CONFIG_FILE), Self::config_path()]
            .into_iter()
            .find(|path| path.is_file())
    }
}
