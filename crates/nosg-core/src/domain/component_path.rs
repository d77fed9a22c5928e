//! Component path expressions and their expansion into glob patterns.
//!
//! A project's sources directory follows a three level convention:
//!
//! ```text
//! sources/
//! └── <set>/            components set
//!     └── <layer>/      group of components sharing a responsibility
//!         ├── <component>.toml
//!         └── <component>/index.toml
//! ```
//!
//! A component path is a short way to point into that tree:
//!
//! | Expression               | Pattern (relative to the sources root) |
//! |--------------------------|----------------------------------------|
//! | `set/layer/component`    | `set/layer/component`                  |
//! | `layer/component`        | `*/layer/component`                    |
//! | `set:component`          | `set/*/component`                      |
//! | `component`              | `*/*/component`                        |
//! | `set:comp/nested/deep`   | `set/*/comp/nested/deep`               |
//!
//! Each pattern is then tried as `<pattern>.<ext>`, `<pattern>/index.<ext>`
//! and, when the last segment already carries the source extension, as
//! `<pattern>` itself.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Extension of component source files when none is configured.
pub const DEFAULT_SOURCE_EXTENSION: &str = "toml";

/// File stem of a directory component's entry file.
pub const DEFAULT_INDEX_NAME: &str = "index";

/// Segment inserted for every level the expression leaves unspecified.
pub const WILDCARD: &str = "*";

/// `set/layer/component`.
const CONVENTION_DEPTH: usize = 3;

/// How component files are named on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConventions {
    /// Extension without the leading dot, e.g. `toml`.
    pub extension: String,
    /// Stem of the entry file of a directory component, e.g. `index`.
    pub index: String,
}

impl SourceConventions {
    pub fn new(extension: impl Into<String>, index: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            index: index.into(),
        }
    }

    /// `.toml` for the default conventions.
    pub fn dotted_extension(&self) -> String {
        format!(".{}", self.extension)
    }

    /// `index.toml` for the default conventions.
    pub fn index_file_name(&self) -> String {
        format!("{}.{}", self.index, self.extension)
    }
}

impl Default for SourceConventions {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_EXTENSION, DEFAULT_INDEX_NAME)
    }
}

/// A component path expression, e.g. `generators:view`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentPath(String);

impl ComponentPath {
    /// Wrap a raw expression. Only empty expressions are rejected; anything
    /// else is a legal (possibly unmatched) pattern.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidComponentPath {
                path: raw,
                reason: "component path cannot be empty".into(),
            });
        }

        let without_trailing = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        Ok(Self(without_trailing.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if the expression is already a filesystem-absolute path (or glob).
    ///
    /// Absolute expressions are never prefixed with the sources directory and
    /// carry no parseable set segment, so layer filtering does not apply.
    pub fn is_absolute(&self) -> bool {
        Path::new(&self.0).is_absolute()
    }

    /// `true` if the last segment already ends with the source extension.
    pub fn has_source_extension(&self, conventions: &SourceConventions) -> bool {
        self.last_segment()
            .is_some_and(|segment| segment.ends_with(&conventions.dotted_extension()))
    }

    /// The pattern relative to the sources root (or the absolute pattern),
    /// before any extension is appended.
    pub fn normalized(&self) -> String {
        if self.is_absolute() {
            return self.0.clone();
        }

        // `set:component` → `set/*/component`, first occurrence only.
        let rewritten = self.0.replacen(':', &format!("/{WILDCARD}/"), 1);

        let mut segments: Vec<&str> = rewritten.split('/').collect();
        while segments.len() < CONVENTION_DEPTH {
            segments.insert(0, WILDCARD);
        }

        segments.join("/")
    }

    /// Expand into the physical glob patterns to look for.
    pub fn expand(
        &self,
        sources_directory: &Path,
        conventions: &SourceConventions,
    ) -> ExpandedPatterns {
        let is_absolute = self.is_absolute();
        let normalized = self.normalized();

        let base = if is_absolute {
            normalized
        } else {
            // The root is a literal path; only the component part is a glob.
            let root = sources_directory.to_string_lossy();
            let root = globset::escape(root.trim_end_matches(['/', '\\']));
            format!("{root}/{normalized}")
        };

        let has_source_extension = self.has_source_extension(conventions);

        let mut patterns = Vec::with_capacity(3);
        if has_source_extension {
            patterns.push(base.clone());
        }
        patterns.push(format!("{base}{}", conventions.dotted_extension()));
        patterns.push(format!("{base}/{}", conventions.index_file_name()));

        ExpandedPatterns {
            patterns,
            is_absolute,
            has_source_extension,
        }
    }

    fn last_segment(&self) -> Option<&str> {
        self.0.rsplit('/').next()
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ComponentPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ComponentPath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComponentPath> for String {
    fn from(value: ComponentPath) -> Self {
        value.0
    }
}

/// Output of [`ComponentPath::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedPatterns {
    /// One to three glob patterns, all absolute.
    pub patterns: Vec<String>,
    /// The original expression was filesystem-absolute.
    pub is_absolute: bool,
    /// The last original segment already ended with the source extension.
    pub has_source_extension: bool,
}
