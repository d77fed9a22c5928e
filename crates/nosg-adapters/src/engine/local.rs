//! Generate engine writing to the local filesystem with `tokio::fs`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use nosg_core::{
    application::{ApplicationError, ports::GenerateEngine},
    domain::{FileContent, FileMap, GenerateReport, WriteOptions},
    error::NosgResult,
};

use super::resolve_target;

/// Production generate engine.
#[derive(Debug, Clone, Default)]
pub struct LocalGenerateEngine {
    working_directory: Option<PathBuf>,
}

impl LocalGenerateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base for relative roots and targets instead of the process cwd.
    pub fn with_working_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    fn base(&self, options: &WriteOptions) -> NosgResult<PathBuf> {
        let cwd = match &self.working_directory {
            Some(directory) => directory.clone(),
            None => std::env::current_dir().map_err(|e| ApplicationError::io(".", e))?,
        };
        Ok(match &options.root {
            Some(root) => resolve_target(&cwd, root),
            None => cwd,
        })
    }
}

#[async_trait]
impl GenerateEngine for LocalGenerateEngine {
    #[instrument(skip_all, fields(files = files.len(), overwrite = options.overwrite))]
    async fn write(&self, files: FileMap, options: WriteOptions) -> NosgResult<GenerateReport> {
        let base = self.base(&options)?;
        let mut report = GenerateReport::default();

        for (target, content) in files {
            let path = resolve_target(&base, &target);

            if !options.overwrite && exists(&path).await? {
                debug!(path = %path.display(), "skipped existing file");
                report.skipped.push(path);
                continue;
            }

            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ApplicationError::io(parent, e))?;
            }
            write_one(&path, content).await?;

            debug!(path = %path.display(), "wrote file");
            report.written.push(path);
        }

        Ok(report.sorted())
    }
}

async fn exists(path: &Path) -> NosgResult<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| ApplicationError::io(path, e).into())
}

async fn write_one(path: &Path, content: FileContent) -> NosgResult<()> {
    let result = match content {
        FileContent::Text(text) => tokio::fs::write(path, text).await,
        FileContent::Bytes(bytes) => tokio::fs::write(path, bytes).await,
        FileContent::Copy(source) => match tokio::fs::copy(&source, path).await {
            Ok(_) => Ok(()),
            Err(e) => return Err(ApplicationError::io(source, e).into()),
        },
    };
    result.map_err(|e| ApplicationError::io(path, e).into())
}
