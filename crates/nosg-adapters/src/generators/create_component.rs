//! `create-component`: writes a skeleton component file into the sources
//! directory.
//!
//! Options:
//!
//! | key                | required | default  |
//! |--------------------|----------|----------|
//! | `name`             | yes      |          |
//! | `layer`            | yes      |          |
//! | `set`              | no       | `"main"` |
//! | `description`      | no       |          |
//! | `sourcesDirectory` | injected by the runner |  |
//!
//! Existing files are never overwritten.

use std::path::PathBuf;

use serde::Serialize;

use nosg_core::{
    application::{GenerateHandle, Generator},
    domain::{
        DomainError, FileContent, FileMap, GeneratorOptions, LayerFilter, SOURCES_DIRECTORY_KEY,
        SourceConventions, WriteOptions,
    },
    error::{Context, NosgResult},
};

pub const CREATE_COMPONENT: &str = "create-component";

const DEFAULT_SET: &str = "main";

#[derive(Debug, Clone, Default)]
pub struct CreateComponentGenerator {
    conventions: SourceConventions,
}

#[derive(Serialize)]
struct Skeleton<'a> {
    component: SkeletonSection<'a>,
}

#[derive(Serialize)]
struct SkeletonSection<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl CreateComponentGenerator {
    pub fn new(conventions: SourceConventions) -> Self {
        Self { conventions }
    }

    /// The file to write, without touching the handle.
    pub fn plan(&self, options: &GeneratorOptions) -> NosgResult<FileMap> {
        let name = segment(options.require_str(CREATE_COMPONENT, "name")?)?;
        let layer = LayerFilter::new(options.require_str(CREATE_COMPONENT, "layer")?)?;
        let set = segment(options.get_str("set").unwrap_or(DEFAULT_SET))?;
        let sources = options.require_str(CREATE_COMPONENT, SOURCES_DIRECTORY_KEY)?;

        let manifest = toml::to_string(&Skeleton {
            component: SkeletonSection {
                name,
                description: options.get_str("description"),
            },
        })
        .context("failed to serialize component skeleton")?;

        let target = PathBuf::from(sources)
            .join(set)
            .join(layer.as_str())
            .join(format!("{name}{}", self.conventions.dotted_extension()));

        Ok(FileMap::from([(target, FileContent::Text(manifest))]))
    }
}

impl Generator for CreateComponentGenerator {
    fn name(&self) -> &str {
        CREATE_COMPONENT
    }

    fn run(&self, handle: GenerateHandle, options: GeneratorOptions) -> NosgResult<()> {
        let files = self.plan(&options)?;
        handle.generate(
            files,
            WriteOptions {
                root: None,
                overwrite: false,
            },
        )
    }
}

fn segment(value: &str) -> Result<&str, DomainError> {
    if value.is_empty() || value.contains(['/', '\\']) {
        return Err(DomainError::InvalidComponentPath {
            path: value.to_string(),
            reason: "expected a single non-empty path segment".into(),
        });
    }
    Ok(value)
}
