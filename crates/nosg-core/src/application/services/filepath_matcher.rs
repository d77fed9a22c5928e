//! Component path → sorted list of matching files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::application::ports::{LogSink, PatternMatcher};
use crate::application::services::{SourcesDirectory, SourcesDirectoryValidator};
use crate::domain::{ComponentPath, LayerFilter, MatchSet, SourceConventions, messages};
use crate::error::NosgResult;

/// Inputs of a component lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub component_path: ComponentPath,
    pub layer: Option<LayerFilter>,
    /// Defaults to the validator's default directory.
    pub sources_directory: Option<PathBuf>,
}

impl MatchRequest {
    pub fn new(component_path: ComponentPath) -> Self {
        Self {
            component_path,
            layer: None,
            sources_directory: None,
        }
    }

    pub fn with_layer(mut self, layer: LayerFilter) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.sources_directory = Some(directory.into());
        self
    }
}

pub struct FilepathMatcher {
    validator: Arc<SourcesDirectoryValidator>,
    matcher: Arc<dyn PatternMatcher>,
    conventions: SourceConventions,
    sink: Arc<dyn LogSink>,
}

impl FilepathMatcher {
    pub fn new(
        validator: Arc<SourcesDirectoryValidator>,
        matcher: Arc<dyn PatternMatcher>,
        conventions: SourceConventions,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            validator,
            matcher,
            conventions,
            sink,
        }
    }

    pub fn validator(&self) -> &SourcesDirectoryValidator {
        &self.validator
    }

    /// Validate the sources directory, then list the matching files.
    pub async fn list(&self, request: &MatchRequest) -> NosgResult<MatchSet> {
        let root = self
            .validator
            .validate(request.sources_directory.as_deref())
            .await?;

        self.list_within(&request.component_path, request.layer.as_ref(), &root)
            .await
    }

    /// List the matching files under an already validated directory.
    #[instrument(skip(self, root), fields(component_path = %component_path))]
    pub async fn list_within(
        &self,
        component_path: &ComponentPath,
        layer: Option<&LayerFilter>,
        root: &SourcesDirectory,
    ) -> NosgResult<MatchSet> {
        let expanded = component_path.expand(root.path(), &self.conventions);
        debug!(patterns = ?expanded.patterns, "expanded component path");

        // Absolute component paths carry no set segment to filter on.
        let layer = layer.filter(|_| !expanded.is_absolute);

        let matches = self
            .match_patterns(&expanded.patterns, layer, root.path())
            .await?;

        self.sink.log(&messages::matching_filepaths(
            component_path.as_str(),
            matches.paths(),
        ));

        Ok(matches)
    }

    /// Run every pattern concurrently and merge the results.
    pub async fn match_patterns(
        &self,
        patterns: &[String],
        layer: Option<&LayerFilter>,
        root: &Path,
    ) -> NosgResult<MatchSet> {
        let results =
            try_join_all(patterns.iter().map(|pattern| self.matcher.find_files(pattern))).await?;

        Ok(MatchSet::merge(results, layer.map(|layer| (layer, root))))
    }
}
