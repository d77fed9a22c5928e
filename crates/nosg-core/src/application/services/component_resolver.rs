//! Component path → exactly one loaded component.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::ApplicationError;
use crate::application::error::NotFoundReason;
use crate::application::ports::{ComponentLoader, LogSink};
use crate::application::services::{FilepathMatcher, MatchRequest, SourcesDirectory};
use crate::domain::{Component, ComponentPath, LayerFilter, messages};
use crate::error::NosgResult;

pub struct ComponentResolver {
    matcher: Arc<FilepathMatcher>,
    loader: Arc<dyn ComponentLoader>,
    sink: Arc<dyn LogSink>,
}

impl ComponentResolver {
    pub fn new(
        matcher: Arc<FilepathMatcher>,
        loader: Arc<dyn ComponentLoader>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            matcher,
            loader,
            sink,
        }
    }

    pub fn matcher(&self) -> &FilepathMatcher {
        &self.matcher
    }

    /// Validate the sources directory, then resolve and load.
    pub async fn resolve(&self, request: &MatchRequest) -> NosgResult<Component> {
        let root = self
            .matcher
            .validator()
            .validate(request.sources_directory.as_deref())
            .await?;

        self.resolve_within(&request.component_path, request.layer.as_ref(), &root)
            .await
    }

    /// Resolve under an already validated directory.
    ///
    /// Zero or several matches are both failures; the caller gets every
    /// candidate so they can disambiguate.
    #[instrument(skip(self, root), fields(component_path = %component_path))]
    pub async fn resolve_within(
        &self,
        component_path: &ComponentPath,
        layer: Option<&LayerFilter>,
        root: &SourcesDirectory,
    ) -> NosgResult<Component> {
        let matches = self
            .matcher
            .list_within(component_path, layer, root)
            .await?;

        let relative = !component_path.is_absolute() && root.from_relative();

        let not_found = |reason| ApplicationError::ComponentNotFound {
            component_path: component_path.to_string(),
            reason,
            relative,
        };

        let mut paths = matches.into_paths();
        let file = match paths.len() {
            1 => paths.remove(0),
            0 => return Err(not_found(NotFoundReason::NoMatch).into()),
            _ => return Err(not_found(NotFoundReason::AmbiguousMatch(paths)).into()),
        };

        self.sink
            .log(&messages::component_found(component_path.as_str(), &file));
        info!(file = %file.display(), "component resolved");

        self.loader.load(&file).await
    }
}
