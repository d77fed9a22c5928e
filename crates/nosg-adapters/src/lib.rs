//! Infrastructure adapters for nosg.
//!
//! This crate implements the ports defined in `nosg-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod engine;
pub mod generators;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod sink;

// Re-export commonly used adapters
pub use engine::{LocalGenerateEngine, MemoryGenerateEngine};
pub use generators::{CREATE_COMPONENT, CreateComponentGenerator, TemplateGenerator};
pub use loader::ManifestComponentLoader;
pub use matcher::GlobPatternMatcher;
pub use registry::GeneratorRegistry;
pub use sink::{MemorySink, WriterSink};
