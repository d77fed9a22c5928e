//! In-memory generate engine for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use nosg_core::{
    application::{ApplicationError, ports::GenerateEngine},
    domain::{FileContent, FileMap, GenerateReport, WriteOptions},
    error::{NosgError, NosgResult},
};

use super::resolve_target;

/// Keeps written files in a shared map. Clones see the same files.
#[derive(Debug, Clone)]
pub struct MemoryGenerateEngine {
    root: PathBuf,
    files: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryGenerateEngine {
    /// Relative targets land under `/`.
    pub fn new() -> Self {
        Self::rooted_at("/")
    }

    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Seed a file, as if it already existed.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
    }

    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().ok()?.get(path).cloned()
    }

    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        String::from_utf8(self.read(path)?).ok()
    }

    /// Every stored path, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryGenerateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerateEngine for MemoryGenerateEngine {
    async fn write(&self, files: FileMap, options: WriteOptions) -> NosgResult<GenerateReport> {
        let base = match &options.root {
            Some(root) => resolve_target(&self.root, root),
            None => self.root.clone(),
        };

        // Copy sources are read before taking the lock.
        let mut resolved = Vec::with_capacity(files.len());
        for (target, content) in files {
            let bytes = match content {
                FileContent::Text(text) => text.into_bytes(),
                FileContent::Bytes(bytes) => bytes,
                FileContent::Copy(source) => match self.read(&source) {
                    Some(bytes) => bytes,
                    None => tokio::fs::read(&source)
                        .await
                        .map_err(|e| ApplicationError::io(&source, e))?,
                },
            };
            resolved.push((resolve_target(&base, &target), bytes));
        }

        let mut store = self.files.write().map_err(|_| NosgError::Internal {
            message: "memory engine lock poisoned".into(),
        })?;

        let mut report = GenerateReport::default();
        for (path, bytes) in resolved {
            if !options.overwrite && store.contains_key(&path) {
                report.skipped.push(path);
                continue;
            }
            store.insert(path.clone(), bytes);
            report.written.push(path);
        }

        Ok(report.sorted())
    }
}
