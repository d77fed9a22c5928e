//! TOML component manifest loader.
//!
//! A component file is a TOML document. Every table is optional; an empty
//! file is a valid component without a generator.
//!
//! # Format
//!
//! ```toml
//! [component]
//! name        = "button"              # defaults to the file (or index directory) name
//! description = "A clickable button"  # optional
//!
//! # Either delegate to a registered generator...
//! [generator]
//! uses = "create-component"
//!
//! [generator.defaults]                # merged under the run options
//! set = "ui"
//!
//! # ...or declare the files to render, with {{key}} placeholders.
//! [[generator.files]]
//! path    = "{{name}}.md"
//! content = "# {{name}}"
//! ```

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use nosg_core::{
    application::{ApplicationError, ports::ComponentLoader},
    domain::{Component, GeneratorOptions, GeneratorSpec, SourceConventions, TemplateFile},
    error::NosgResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a component file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ComponentManifest {
    #[serde(default)]
    pub component: ComponentSection,
    pub generator: Option<GeneratorSection>,
}

/// `[component]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ComponentSection {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `[generator]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeneratorSection {
    /// Id of a registered generator.
    pub uses: Option<String>,
    /// Option defaults for `uses`.
    #[serde(default)]
    pub defaults: toml::Table,
    /// Files rendered when no `uses` is given.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One entry under `[[generator.files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Component`]s from TOML manifests.
#[derive(Debug, Clone, Default)]
pub struct ManifestComponentLoader {
    conventions: SourceConventions,
}

impl ManifestComponentLoader {
    pub fn new(conventions: SourceConventions) -> Self {
        Self { conventions }
    }

    /// Parse manifest text read from `path`.
    pub fn parse(&self, path: &Path, raw: &str) -> NosgResult<Component> {
        let manifest: ComponentManifest =
            toml::from_str(raw).map_err(|e| load_failed(path, e.message()))?;

        let mut component = Component::at(path, &self.conventions);
        if let Some(name) = manifest.component.name {
            component.name = name;
        }
        component.description = manifest.component.description;

        if let Some(generator) = manifest.generator {
            component.generator = Some(generator_spec(path, generator)?);
        }

        Ok(component)
    }
}

#[async_trait]
impl ComponentLoader for ManifestComponentLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn load(&self, path: &Path) -> NosgResult<Component> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApplicationError::io(path, e))?;
        let component = self.parse(path, &raw)?;

        debug!(
            name = %component.name,
            generator = component.declares_generator(),
            "loaded component"
        );
        Ok(component)
    }
}

fn generator_spec(path: &Path, section: GeneratorSection) -> NosgResult<GeneratorSpec> {
    match (section.uses, section.files.is_empty()) {
        (Some(_), false) => Err(load_failed(
            path,
            "[generator] declares both `uses` and [[generator.files]]",
        )),
        (None, true) => Err(load_failed(
            path,
            "[generator] declares neither `uses` nor [[generator.files]]",
        )),
        (Some(id), true) => {
            let defaults = serde_json::to_value(&section.defaults)
                .map_err(|e| load_failed(path, &e.to_string()))?;
            let defaults = GeneratorOptions::from_value(defaults)
                .map_err(|e| load_failed(path, &e.to_string()))?;
            Ok(GeneratorSpec::Registered { id, defaults })
        }
        (None, false) => Ok(GeneratorSpec::Template {
            files: section
                .files
                .into_iter()
                .map(|entry| TemplateFile {
                    path: entry.path,
                    content: entry.content,
                })
                .collect(),
        }),
    }
}

fn load_failed(path: &Path, reason: &str) -> nosg_core::error::NosgError {
    ApplicationError::ComponentLoadFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nosg_core::error::NosgError;
    use tempfile::TempDir;

    fn parse(raw: &str) -> NosgResult<Component> {
        ManifestComponentLoader::default().parse(Path::new("/s/set/layer/button.toml"), raw)
    }

    #[test]
    fn empty_file_is_a_plain_component() {
        let component = parse("").unwrap();
        assert_eq!(component.name, "button");
        assert_eq!(component.description, None);
        assert!(!component.declares_generator());
    }

    #[test]
    fn component_table_overrides_defaults() {
        let component = parse(
            r#"
            [component]
            name = "primary-button"
            description = "The main call to action"
            "#,
        )
        .unwrap();

        assert_eq!(component.name, "primary-button");
        assert_eq!(
            component.description.as_deref(),
            Some("The main call to action")
        );
    }

    #[test]
    fn registered_generator_keeps_defaults() {
        let component = parse(
            r#"
            [generator]
            uses = "create-component"

            [generator.defaults]
            set = "ui"
            layer = "atoms"
            "#,
        )
        .unwrap();

        let Some(GeneratorSpec::Registered { id, defaults }) = component.generator else {
            panic!("expected a registered generator");
        };
        assert_eq!(id, "create-component");
        assert_eq!(defaults.get_str("set"), Some("ui"));
        assert_eq!(defaults.get_str("layer"), Some("atoms"));
    }

    #[test]
    fn template_generator_lists_files() {
        let component = parse(
            r##"
            [[generator.files]]
            path = "{{name}}.md"
            content = "# {{name}}"

            [[generator.files]]
            path = "empty.txt"
            "##,
        )
        .unwrap();

        let Some(GeneratorSpec::Template { files }) = component.generator else {
            panic!("expected a template generator");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "{{name}}.md");
        assert_eq!(files[1].content, "");
    }

    #[test]
    fn generator_table_must_pick_one_kind() {
        let both = parse(
            r#"
            [generator]
            uses = "create-component"
            [[generator.files]]
            path = "a"
            "#,
        );
        let neither = parse("[generator]\n");

        for result in [both, neither] {
            assert!(matches!(
                result,
                Err(NosgError::Application(
                    ApplicationError::ComponentLoadFailed { .. }
                ))
            ));
        }
    }

    #[test]
    fn syntax_errors_name_the_file() {
        let err = parse("[component\n").unwrap_err();
        assert!(err.to_string().contains("/s/set/layer/button.toml"));
    }

    #[tokio::test]
    async fn load_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.toml");
        std::fs::write(&path, "[component]\ndescription = \"on disk\"\n").unwrap();

        let component = ManifestComponentLoader::default()
            .load(&path)
            .await
            .unwrap();

        assert_eq!(component.path, path);
        assert_eq!(component.description.as_deref(), Some("on disk"));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = ManifestComponentLoader::default()
            .load(Path::new("/definitely/not/here.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NosgError::Application(ApplicationError::Io { .. })
        ));
    }
}
