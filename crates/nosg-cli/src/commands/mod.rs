//! Command handlers.
//!
//! Each handler translates parsed arguments into a core request, calls the
//! service, and renders the result. No business logic lives here.

pub mod check_sources_directory;
pub mod completions;
pub mod config;
pub mod get_component;
pub mod init;
pub mod list_matching_filepaths;
pub mod run_generator;

use std::sync::Arc;

use nosg_adapters::{
    GeneratorRegistry, GlobPatternMatcher, LocalGenerateEngine, ManifestComponentLoader,
};
use nosg_core::application::ports::LogSink;
use nosg_core::application::{
    ComponentResolver, FilepathMatcher, GeneratorRunner, MatchRequest, SourcesDirectoryValidator,
};
use nosg_core::domain::{ComponentPath, LayerFilter};

use crate::{
    cli::LookupArgs, config::AppConfig, error::CliResult, output::OutputManager,
};

/// The services a command runs against, wired from the configuration.
pub struct Context {
    pub config: AppConfig,
    pub output: Arc<OutputManager>,
    pub matcher: Arc<FilepathMatcher>,
    pub resolver: Arc<ComponentResolver>,
    pub runner: GeneratorRunner,
}

impl Context {
    pub fn new(config: AppConfig, output: OutputManager) -> Self {
        let output = Arc::new(output);
        let sink: Arc<dyn LogSink> = output.clone();
        let conventions = config.conventions();

        let validator = SourcesDirectoryValidator::new(sink.clone())
            .with_default_directory(config.sources.directory.clone());
        let matcher = Arc::new(FilepathMatcher::new(
            Arc::new(validator),
            Arc::new(GlobPatternMatcher::new()),
            conventions.clone(),
            sink.clone(),
        ));
        let resolver = Arc::new(ComponentResolver::new(
            matcher.clone(),
            Arc::new(ManifestComponentLoader::new(conventions.clone())),
            sink.clone(),
        ));
        let runner = GeneratorRunner::new(
            resolver.clone(),
            Arc::new(GeneratorRegistry::with_builtin(conventions)),
            Arc::new(LocalGenerateEngine::new()),
            sink,
        );

        Self {
            config,
            output,
            matcher,
            resolver,
            runner,
        }
    }
}

/// Build the match request shared by the lookup commands.
fn match_request(args: LookupArgs) -> CliResult<MatchRequest> {
    let mut request = MatchRequest::new(ComponentPath::new(args.component_path)?);
    if let Some(layer) = args.layer {
        request = request.with_layer(LayerFilter::new(layer)?);
    }
    if let Some(directory) = args.sources.sources_directory {
        request = request.in_directory(directory);
    }
    Ok(request)
}
