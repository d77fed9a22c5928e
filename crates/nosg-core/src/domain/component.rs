use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{GeneratorOptions, SourceConventions};

/// A component loaded from exactly one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    /// Absolute path of the file the component was loaded from.
    pub path: PathBuf,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorSpec>,
}

impl Component {
    /// A component with no metadata, named after its file.
    pub fn at(path: impl Into<PathBuf>, conventions: &SourceConventions) -> Self {
        let path = path.into();
        let name = default_name(&path, conventions);
        Self {
            path,
            name,
            description: None,
            generator: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_generator(mut self, generator: GeneratorSpec) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn declares_generator(&self) -> bool {
        self.generator.is_some()
    }
}

/// What a component's `[generator]` table declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorSpec {
    /// A generator from the registry, with option defaults.
    Registered {
        id: String,
        defaults: GeneratorOptions,
    },
    /// Files rendered from the component itself.
    Template { files: Vec<TemplateFile> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateFile {
    pub path: String,
    pub content: String,
}

/// File stem, or the parent directory name for index files.
fn default_name(path: &Path, conventions: &SourceConventions) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem == conventions.index {
        if let Some(parent) = path.parent().and_then(Path::file_name) {
            return parent.to_string_lossy().into_owned();
        }
    }

    stem
}
