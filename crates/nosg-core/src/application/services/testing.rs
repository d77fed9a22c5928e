//! Hand-written port fakes shared by the service tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::generator::Generator;
use crate::application::ports::{
    ComponentLoader, GenerateEngine, GeneratorFactory, LogSink, PatternMatcher,
};
use crate::domain::{
    Component, DomainError, FileMap, GenerateReport, LogLevel, SourceConventions, WriteOptions,
};
use crate::error::NosgResult;

#[derive(Default)]
pub struct RecordingSink(Mutex<Vec<(LogLevel, String)>>);

impl RecordingSink {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.0.lock().unwrap().clone()
    }

    pub fn levels(&self) -> Vec<LogLevel> {
        self.lines().into_iter().map(|(level, _)| level).collect()
    }
}

impl LogSink for RecordingSink {
    fn write_line(&self, level: LogLevel, message: &str) {
        self.0.lock().unwrap().push((level, message.to_string()));
    }
}

/// Answers patterns from a fixed table; unknown patterns match nothing.
#[derive(Default)]
pub struct TableMatcher {
    table: HashMap<String, Vec<PathBuf>>,
}

impl TableMatcher {
    pub fn with(mut self, pattern: impl Into<String>, paths: &[impl AsRef<Path>]) -> Self {
        self.table.insert(
            pattern.into(),
            paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        );
        self
    }
}

#[async_trait]
impl PatternMatcher for TableMatcher {
    async fn find_files(&self, pattern: &str) -> NosgResult<Vec<PathBuf>> {
        Ok(self.table.get(pattern).cloned().unwrap_or_default())
    }
}

/// Builds a bare component named after its file.
pub struct StemLoader;

#[async_trait]
impl ComponentLoader for StemLoader {
    async fn load(&self, path: &Path) -> NosgResult<Component> {
        Ok(Component::at(path, &SourceConventions::default()))
    }
}

/// Maps component names to generators.
#[derive(Default)]
pub struct NamedFactory {
    generators: HashMap<String, Arc<dyn Generator>>,
}

impl NamedFactory {
    pub fn with(mut self, component: &str, generator: Arc<dyn Generator>) -> Self {
        self.generators.insert(component.to_string(), generator);
        self
    }
}

impl GeneratorFactory for NamedFactory {
    fn build(&self, component: &Component) -> NosgResult<Arc<dyn Generator>> {
        self.generators
            .get(&component.name)
            .cloned()
            .ok_or_else(|| {
                DomainError::InvalidGeneratorReference {
                    value: component.path.display().to_string(),
                    kind: "component",
                }
                .into()
            })
    }
}

/// Reports every file as written, after an optional delay.
#[derive(Default)]
pub struct DelayedEngine {
    delay: Option<Duration>,
    never_finishes: bool,
    writes: Mutex<usize>,
}

impl DelayedEngine {
    pub fn after(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            never_finishes: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl GenerateEngine for DelayedEngine {
    async fn write(&self, files: FileMap, _options: WriteOptions) -> NosgResult<GenerateReport> {
        *self.writes.lock().unwrap() += 1;
        if self.never_finishes {
            futures::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(GenerateReport {
            written: files.into_keys().collect(),
            skipped: vec![],
        })
    }
}
