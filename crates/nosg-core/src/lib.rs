//! nosg Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for nosg, a
//! convention-driven component locator and generator runner, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             nosg-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  SourcesDirectoryValidator, Filepath-   │
//! │  Matcher, ComponentResolver,            │
//! │  GeneratorRunner                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  PatternMatcher, ComponentLoader,       │
//! │  GeneratorFactory, GenerateEngine,      │
//! │  LogSink                                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     nosg-adapters (Infrastructure)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nosg_core::prelude::*;
//!
//! # async fn demo(matcher: Arc<dyn PatternMatcher>, loader: Arc<dyn ComponentLoader>) -> NosgResult<()> {
//! let sink: Arc<dyn LogSink> = Arc::new(NullSink);
//! let validator = Arc::new(SourcesDirectoryValidator::new(sink.clone()));
//! let matcher = Arc::new(FilepathMatcher::new(
//!     validator,
//!     matcher,
//!     SourceConventions::default(),
//!     sink.clone(),
//! ));
//! let resolver = ComponentResolver::new(matcher, loader, sink);
//!
//! let request = MatchRequest::new(ComponentPath::new("generators:component")?);
//! let component = resolver.resolve(&request).await?;
//! println!("{}", component.path.display());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComponentLoader, ComponentResolver, FilepathMatcher, GenerateEngine, GenerateHandle,
        Generator, GeneratorFactory, GeneratorRef, GeneratorRunner, LogSink, MatchRequest,
        NullSink, PatternMatcher, RunRequest, SourcesDirectory, SourcesDirectoryValidator,
        from_fn,
    };
    pub use crate::domain::{
        Component, ComponentPath, FileContent, FileMap, GenerateReport, GeneratorOptions,
        GeneratorSpec, LayerFilter, LogLevel, MatchSet, SourceConventions, WriteOptions,
    };
    pub use crate::error::{NosgError, NosgResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
