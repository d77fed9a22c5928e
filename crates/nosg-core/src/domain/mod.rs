//! Domain layer for nosg.
//!
//! Pure values and rules, no I/O:
//!
//! - [`ComponentPath`]: expression → glob patterns
//! - [`MatchSet`] / [`LayerFilter`]: merging and filtering matches
//! - [`Component`]: what a component file declares
//! - [`GeneratorOptions`], [`FileMap`]: generator inputs and outputs
//! - [`messages`]: every user-facing sentence

pub mod component;
pub mod component_path;
pub mod error;
pub mod files;
pub mod match_set;
pub mod messages;
pub mod options;

pub use component::{Component, GeneratorSpec, TemplateFile};
pub use component_path::{
    ComponentPath, DEFAULT_INDEX_NAME, DEFAULT_SOURCE_EXTENSION, ExpandedPatterns,
    SourceConventions, WILDCARD,
};
pub use error::DomainError;
pub use files::{FileContent, FileMap, GenerateReport, WriteOptions};
pub use match_set::{LayerFilter, MatchSet};
pub use messages::LogLevel;
pub use options::{GeneratorOptions, SOURCES_DIRECTORY_KEY};
