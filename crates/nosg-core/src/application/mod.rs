//! Application layer for nosg.
//!
//! This layer contains:
//! - **Services**: use case orchestration (validation, matching, resolution, runs)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Generator**: the `Generator` trait and the per-run `GenerateHandle`
//! - **Errors**: application-specific error types
//!
//! Rules about paths and options live in `crate::domain`.

pub mod error;
pub mod generator;
pub mod ports;
pub mod services;

pub use services::{
    ComponentResolver, FilepathMatcher, GeneratorRunner, MatchRequest, RunRequest,
    SourcesDirectory, SourcesDirectoryValidator,
};

pub use generator::{FnGenerator, GenerateHandle, Generator, GeneratorRef, from_fn};

pub use ports::{
    ComponentLoader, GenerateEngine, GeneratorFactory, LogSink, NullSink, PatternMatcher,
};

pub use error::{ApplicationError, NotFoundReason};
