use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::DomainError;

/// Restricts matches to one layer of the `set/layer/component` convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerFilter(String);

impl LayerFilter {
    pub fn new(layer: impl Into<String>) -> Result<Self, DomainError> {
        let layer = layer.into();
        if layer.is_empty() || layer.contains('/') || layer.contains('\\') {
            return Err(DomainError::InvalidLayer(layer));
        }
        Ok(Self(layer))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if the segment right after the set segment of `path`
    /// (relative to `sources_directory`) is this layer.
    ///
    /// Paths outside `sources_directory` never match.
    pub fn matches(&self, path: &Path, sources_directory: &Path) -> bool {
        path.strip_prefix(sources_directory)
            .ok()
            .and_then(|relative| relative.components().nth(1))
            .is_some_and(|segment| segment.as_os_str() == self.0.as_str())
    }
}

impl std::fmt::Display for LayerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sorted, deduplicated absolute file paths matching a component path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet(Vec<PathBuf>);

impl MatchSet {
    /// Merge pattern results into a match set.
    ///
    /// The layer filter is applied to the merged set. Ordering is byte-wise
    /// on the full path string, so `component.toml` sorts before
    /// `component/index.toml`.
    pub fn merge<I>(results: I, layer: Option<(&LayerFilter, &Path)>) -> Self
    where
        I: IntoIterator<Item = Vec<PathBuf>>,
    {
        let mut paths: Vec<PathBuf> = results.into_iter().flatten().collect();

        if let Some((filter, sources_directory)) = layer {
            paths.retain(|path| filter.matches(path, sources_directory));
        }

        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        paths.dedup();

        Self(paths)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// The single match, if there is exactly one.
    pub fn single(&self) -> Option<&Path> {
        match self.0.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.0
    }
}

impl IntoIterator for MatchSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn layer_must_be_a_single_segment() {
        assert!(LayerFilter::new("layer").is_ok());
        assert!(LayerFilter::new("a/b").is_err());
        assert!(LayerFilter::new("").is_err());
    }

    #[test]
    fn layer_matches_second_segment_under_sources() {
        let filter = LayerFilter::new("layer-a").unwrap();
        let root = Path::new("/s");

        assert!(filter.matches(Path::new("/s/set/layer-a/comp.toml"), root));
        assert!(!filter.matches(Path::new("/s/layer-a/other/comp.toml"), root));
        assert!(!filter.matches(Path::new("/elsewhere/set/layer-a/comp.toml"), root));
    }

    #[test]
    fn merge_sorts_bytewise_and_dedups() {
        let set = MatchSet::merge(
            [
                vec![p("/s/set/layer/component-double/index.toml")],
                vec![
                    p("/s/set/layer/component-double.toml"),
                    p("/s/set/layer/component-double/index.toml"),
                ],
            ],
            None,
        );

        assert_eq!(
            set.paths(),
            [
                p("/s/set/layer/component-double.toml"),
                p("/s/set/layer/component-double/index.toml"),
            ]
        );
        assert_eq!(set.single(), None);
    }

    #[test]
    fn merge_filters_the_whole_set() {
        let filter = LayerFilter::new("b").unwrap();
        let set = MatchSet::merge(
            [
                vec![p("/s/x/a/comp.toml")],
                vec![p("/s/y/b/comp.toml")],
            ],
            Some((&filter, Path::new("/s"))),
        );

        assert_eq!(set.single(), Some(Path::new("/s/y/b/comp.toml")));
    }

    #[test]
    fn empty_results_give_empty_set() {
        let set = MatchSet::merge(Vec::<Vec<PathBuf>>::new(), None);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
