//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: "is this a sources directory", "which files match
//! this component path", "load this component" and "run this generator".

pub mod component_resolver;
pub mod filepath_matcher;
pub mod generator_runner;
pub mod sources_directory;

#[cfg(test)]
pub(crate) mod testing;

pub use component_resolver::ComponentResolver;
pub use filepath_matcher::{FilepathMatcher, MatchRequest};
pub use generator_runner::{COMMAND, DEFAULT_TIMEOUT, GeneratorRunner, PROGRAM, RunRequest};
pub use sources_directory::{
    DEFAULT_SOURCES_DIRECTORY, SourcesDirectory, SourcesDirectoryValidator,
};
