//! Sources directory validation.
//!
//! Every lookup and every generator run starts here.

use std::path::{Component as PathComponent, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{LogSink, NullSink};
use crate::domain::messages;
use crate::error::NosgResult;

/// Sources directory used when none is given.
pub const DEFAULT_SOURCES_DIRECTORY: &str = "sources";

/// A sources directory that was checked to exist and be a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesDirectory {
    path: PathBuf,
    from_relative: bool,
}

impl SourcesDirectory {
    /// Absolute, lexically normalized path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` if the caller gave a relative path (or none).
    pub fn from_relative(&self) -> bool {
        self.from_relative
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for SourcesDirectory {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

pub struct SourcesDirectoryValidator {
    default_directory: PathBuf,
    working_directory: Option<PathBuf>,
    sink: Arc<dyn LogSink>,
}

impl SourcesDirectoryValidator {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            default_directory: PathBuf::from(DEFAULT_SOURCES_DIRECTORY),
            working_directory: None,
            sink,
        }
    }

    pub fn silent() -> Self {
        Self::new(Arc::new(NullSink))
    }

    /// Directory checked when `validate` gets `None`.
    pub fn with_default_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.default_directory = directory.into();
        self
    }

    /// Resolve relative paths against `directory` instead of the process
    /// working directory.
    pub fn with_working_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    pub fn default_directory(&self) -> &Path {
        &self.default_directory
    }

    #[instrument(skip(self))]
    pub async fn validate(&self, directory: Option<&Path>) -> NosgResult<SourcesDirectory> {
        let requested = directory.unwrap_or(&self.default_directory);
        let from_relative = requested.is_relative();
        let path = normalize(&self.working_directory()?.join(requested));

        debug!(path = %path.display(), "checking sources directory");

        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(ApplicationError::SourcesDirectoryNotADirectory {
                    path,
                    relative: from_relative,
                }
                .into());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ApplicationError::SourcesDirectoryNotFound {
                    path,
                    relative: from_relative,
                }
                .into());
            }
            Err(e) => return Err(ApplicationError::io(path, e).into()),
        }

        self.sink.success(&messages::valid_sources_directory(&path));

        Ok(SourcesDirectory {
            path,
            from_relative,
        })
    }

    fn working_directory(&self) -> NosgResult<PathBuf> {
        match &self.working_directory {
            Some(directory) => Ok(directory.clone()),
            None => std::env::current_dir()
                .map_err(|e| ApplicationError::io(".", e).into()),
        }
    }
}

/// Drop `.` segments and fold `..` segments without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            PathComponent::CurDir => {}
            PathComponent::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::RecordingSink;
    use crate::domain::LogLevel;
    use crate::error::NosgError;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sources")).unwrap();
        std::fs::write(dir.path().join("file.txt"), "").unwrap();
        dir
    }

    #[tokio::test]
    async fn default_directory_is_resolved_against_working_directory() {
        let dir = workspace();
        let sink = Arc::new(RecordingSink::default());
        let validator =
            SourcesDirectoryValidator::new(sink.clone()).with_working_directory(dir.path());

        let validated = validator.validate(None).await.unwrap();

        assert_eq!(validated.path(), dir.path().join("sources"));
        assert!(validated.from_relative());

        assert_eq!(
            sink.lines(),
            vec![(
                LogLevel::Success,
                messages::valid_sources_directory(&dir.path().join("sources"))
            )]
        );
    }

    #[tokio::test]
    async fn dot_segments_are_normalized() {
        let dir = workspace();
        let validator = SourcesDirectoryValidator::silent().with_working_directory(dir.path());

        let validated = validator
            .validate(Some(Path::new("./sources/../sources")))
            .await
            .unwrap();

        assert_eq!(validated.path(), dir.path().join("sources"));
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let dir = workspace();
        let validator = SourcesDirectoryValidator::silent().with_working_directory(dir.path());

        let err = validator
            .validate(Some(Path::new("unexistent")))
            .await
            .unwrap_err();

        match err {
            NosgError::Application(ApplicationError::SourcesDirectoryNotFound {
                path,
                relative,
            }) => {
                assert_eq!(path, dir.path().join("unexistent"));
                assert!(relative);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn file_is_not_a_directory() {
        let dir = workspace();
        let validator = SourcesDirectoryValidator::silent();

        let err = validator
            .validate(Some(&dir.path().join("file.txt")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NosgError::Application(ApplicationError::SourcesDirectoryNotADirectory {
                relative: false,
                ..
            })
        ));
        assert!(!err.to_string().contains("current working directory"));
    }

    #[tokio::test]
    async fn failures_do_not_log() {
        let dir = workspace();
        let sink = Arc::new(RecordingSink::default());
        let validator =
            SourcesDirectoryValidator::new(sink.clone()).with_working_directory(dir.path());

        assert!(validator.validate(Some(Path::new("nope"))).await.is_err());
        assert!(sink.lines().is_empty());
    }
}
