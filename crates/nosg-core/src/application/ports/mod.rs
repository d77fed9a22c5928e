//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `nosg-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `PatternMatcher`: glob expansion over the filesystem
//!   - `ComponentLoader`: component file → `Component`
//!   - `GeneratorFactory`: `Component` → `Generator`
//!   - `GenerateEngine`: file persistence
//!   - `LogSink`: leveled user-facing lines
//!
//! - **Driving (Input) Ports**: the services in `application::services`

pub mod output;

pub use output::{
    ComponentLoader, GenerateEngine, GeneratorFactory, LogSink, NullSink, PatternMatcher,
};

#[cfg(test)]
pub use output::{MockComponentLoader, MockGenerateEngine, MockPatternMatcher};
