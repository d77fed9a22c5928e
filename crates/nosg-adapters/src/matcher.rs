//! Glob pattern matcher over the local filesystem.
//!
//! Patterns use `/` as separator. `*`, `?`, `[...]` and `{a,b}` never cross
//! a separator; `**` does. Only regular files (or symlinks to them) match.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use globset::GlobBuilder;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use nosg_core::{
    application::{ApplicationError, ports::PatternMatcher},
    error::{Context, NosgResult},
};

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Production pattern matcher: `globset` for matching, `walkdir` for the
/// traversal, run on tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct GlobPatternMatcher {
    follow_links: bool,
}

impl GlobPatternMatcher {
    pub fn new() -> Self {
        Self { follow_links: true }
    }

    /// Whether directory symlinks are descended into (default: yes).
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

impl Default for GlobPatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatternMatcher for GlobPatternMatcher {
    #[instrument(skip(self))]
    async fn find_files(&self, pattern: &str) -> NosgResult<Vec<PathBuf>> {
        let owned = pattern.to_string();
        let follow_links = self.follow_links;

        let files = tokio::task::spawn_blocking(move || walk(&owned, follow_links))
            .await
            .context("pattern walk task failed")??;

        debug!(count = files.len(), "pattern matched");
        Ok(files)
    }
}

fn walk(pattern: &str, follow_links: bool) -> NosgResult<Vec<PathBuf>> {
    let split = SplitPattern::new(pattern);

    // No wildcard at all: a plain existence check.
    if split.depth == Some(0) {
        return Ok(match std::fs::metadata(&split.root) {
            Ok(metadata) if metadata.is_file() => vec![split.root],
            Ok(_) => Vec::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(ApplicationError::io(split.root, e).into()),
        });
    }

    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| ApplicationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })?
        .compile_matcher();

    let mut walker = WalkDir::new(&split.root).follow_links(follow_links);
    if let Some(depth) = split.depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => continue,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| split.root.clone());
                match err.into_io_error() {
                    // Missing root, or an entry removed during the walk.
                    Some(io) if io.kind() == std::io::ErrorKind::NotFound => continue,
                    Some(io) => return Err(ApplicationError::io(path, io).into()),
                    None => continue,
                }
            }
        };

        if entry.file_type().is_file() && glob.is_match(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// A pattern cut at its first wildcard segment.
#[derive(Debug, PartialEq, Eq)]
struct SplitPattern {
    /// Longest wildcard-free directory prefix with escapes removed (the full
    /// path when there is no wildcard at all).
    root: PathBuf,
    /// Segments left below `root`; `None` when a `**` makes it unbounded.
    depth: Option<usize>,
}

impl SplitPattern {
    fn new(pattern: &str) -> Self {
        let segments: Vec<&str> = pattern.split('/').collect();
        let literal: Vec<String> = segments
            .iter()
            .map_while(|segment| literal_segment(segment))
            .collect();

        let root = match literal.join("/") {
            prefix if prefix.is_empty() && pattern.starts_with('/') => PathBuf::from("/"),
            prefix if prefix.is_empty() => PathBuf::from("."),
            prefix => PathBuf::from(prefix),
        };

        let rest = &segments[literal.len()..];
        let depth = if rest.contains(&"**") {
            None
        } else {
            Some(rest.len())
        };

        Self { root, depth }
    }
}

/// The text a segment matches when it holds no wildcard.
///
/// A metacharacter wrapped as `[c]` (what `globset::escape` produces) is a
/// literal `c`; any other metacharacter makes the segment a wildcard.
fn literal_segment(segment: &str) -> Option<String> {
    let mut literal = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c == '[' {
            let mut class = chars.clone();
            match (class.next(), class.next()) {
                (Some(meta), Some(']')) if GLOB_META.contains(&meta) => {
                    literal.push(meta);
                    chars = class;
                    continue;
                }
                _ => return None,
            }
        }
        if GLOB_META.contains(&c) {
            return None;
        }
        literal.push(c);
    }
    Some(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nosg_core::domain::{ComponentPath, SourceConventions};
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "").unwrap();
        path
    }

    fn pattern(root: &Path, relative: &str) -> String {
        format!("{}/{relative}", root.display())
    }

    #[test]
    fn split_stops_at_first_wildcard() {
        assert_eq!(
            SplitPattern::new("/s/set/*/comp.toml"),
            SplitPattern {
                root: PathBuf::from("/s/set"),
                depth: Some(2)
            }
        );
        assert_eq!(
            SplitPattern::new("/s/**/comp.toml"),
            SplitPattern {
                root: PathBuf::from("/s"),
                depth: None
            }
        );
        assert_eq!(
            SplitPattern::new("/s/a/b.toml"),
            SplitPattern {
                root: PathBuf::from("/s/a/b.toml"),
                depth: Some(0)
            }
        );
        assert_eq!(SplitPattern::new("/*/x").root, PathBuf::from("/"));
    }

    #[test]
    fn escaped_metacharacters_stay_in_the_root() {
        let pattern = format!("{}/*/*/comp.toml", globset::escape("/w/proj[1]/{a}?*"));
        assert_eq!(
            SplitPattern::new(&pattern),
            SplitPattern {
                root: PathBuf::from("/w/proj[1]/{a}?*"),
                depth: Some(3)
            }
        );
    }

    #[tokio::test]
    async fn sources_under_a_bracketed_directory_still_match() {
        let dir = TempDir::new().unwrap();
        let sources = dir.path().join("proj[1]").join("sources");
        let expected = touch(&sources, "set/layer/comp.toml");
        let conventions = SourceConventions::default();
        let matcher = GlobPatternMatcher::new();

        for raw in ["set/layer/comp", "comp"] {
            let expanded = ComponentPath::new(raw)
                .unwrap()
                .expand(&sources, &conventions);
            let mut found = Vec::new();
            for pattern in &expanded.patterns {
                found.extend(matcher.find_files(pattern).await.unwrap());
            }
            assert_eq!(found, vec![expected.clone()], "component path {raw}");
        }
    }

    #[tokio::test]
    async fn star_matches_a_single_segment() {
        let dir = TempDir::new().unwrap();
        let expected = touch(dir.path(), "set/layer/comp.toml");
        touch(dir.path(), "set/layer/nested/comp.toml");
        touch(dir.path(), "set/layer/comp.txt");

        let files = GlobPatternMatcher::new()
            .find_files(&pattern(dir.path(), "*/*/comp.toml"))
            .await
            .unwrap();

        assert_eq!(files, vec![expected]);
    }

    #[tokio::test]
    async fn directories_never_match() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("set/layer/comp.toml")).unwrap();

        let files = GlobPatternMatcher::new()
            .find_files(&pattern(dir.path(), "*/*/comp.toml"))
            .await
            .unwrap();

        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn literal_pattern_is_an_existence_check() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "a/b/c.toml");
        let matcher = GlobPatternMatcher::new();

        assert_eq!(
            matcher
                .find_files(&pattern(dir.path(), "a/b/c.toml"))
                .await
                .unwrap(),
            vec![file]
        );
        assert!(
            matcher
                .find_files(&pattern(dir.path(), "a/b/missing.toml"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn missing_root_is_no_match() {
        let dir = TempDir::new().unwrap();

        let files = GlobPatternMatcher::new()
            .find_files(&pattern(dir.path(), "missing/*/comp.toml"))
            .await
            .unwrap();

        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn double_star_crosses_directories() {
        let dir = TempDir::new().unwrap();
        let deep = touch(dir.path(), "a/b/c/d/component-a.toml");

        let files = GlobPatternMatcher::new()
            .find_files(&pattern(dir.path(), "**/component-a.toml"))
            .await
            .unwrap();

        assert_eq!(files, vec![deep]);
    }

    #[tokio::test]
    async fn malformed_glob_is_reported() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/b.toml");

        let err = GlobPatternMatcher::new()
            .find_files(&pattern(dir.path(), "a/[b.toml"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_application(),
            Some(ApplicationError::InvalidPattern { .. })
        ));
    }
}
