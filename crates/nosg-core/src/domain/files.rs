use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Content of one file to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Bytes(Vec<u8>),
    /// Copy an existing file verbatim.
    Copy(PathBuf),
}

impl From<String> for FileContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Target path → content. Ordered so engines write deterministically.
pub type FileMap = BTreeMap<PathBuf, FileContent>;

/// Options for one engine write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Relative targets are joined to this directory (the current working
    /// directory when unset).
    pub root: Option<PathBuf>,
    /// Replace files that already exist.
    pub overwrite: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            root: None,
            overwrite: true,
        }
    }
}

impl WriteOptions {
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }
}

/// Outcome of one engine write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    /// Files written, sorted.
    pub written: Vec<PathBuf>,
    /// Existing files left untouched because `overwrite` was off.
    pub skipped: Vec<PathBuf>,
}

impl GenerateReport {
    pub fn sorted(mut self) -> Self {
        self.written.sort();
        self.skipped.sort();
        self
    }
}
