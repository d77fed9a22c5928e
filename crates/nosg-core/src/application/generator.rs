//! Generators and the per-run handle they write files through.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::debug;

use crate::application::ApplicationError;
use crate::application::ports::GenerateEngine;
use crate::domain::{DomainError, FileMap, GenerateReport, GeneratorOptions, WriteOptions};
use crate::error::{NosgError, NosgResult};

/// Something that produces files through a [`GenerateHandle`].
///
/// `run` is called synchronously. A generator may call
/// [`GenerateHandle::generate`] before returning, or hand the (cloneable)
/// handle to a spawned task and call it later; the runner only waits for the
/// first call to finish, up to its timeout.
pub trait Generator: Send + Sync {
    /// Name used in log lines and error messages.
    fn name(&self) -> &str;

    fn run(&self, handle: GenerateHandle, options: GeneratorOptions) -> NosgResult<()>;
}

/// A [`Generator`] backed by a closure.
pub struct FnGenerator<F> {
    name: String,
    f: F,
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(GenerateHandle, GeneratorOptions) -> NosgResult<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, handle: GenerateHandle, options: GeneratorOptions) -> NosgResult<()> {
        (self.f)(handle, options)
    }
}

/// Wrap a closure as a shareable generator.
pub fn from_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn Generator>
where
    F: Fn(GenerateHandle, GeneratorOptions) -> NosgResult<()> + Send + Sync + 'static,
{
    Arc::new(FnGenerator {
        name: name.into(),
        f,
    })
}

/// What `run-generator` was asked to run.
#[derive(Clone)]
pub enum GeneratorRef {
    /// An in-process generator.
    Generator(Arc<dyn Generator>),
    /// A component path to a component declaring a generator.
    Path(String),
}

impl GeneratorRef {
    pub fn path(raw: impl Into<String>) -> Self {
        Self::Path(raw.into())
    }

    /// Blank paths are not a generator reference.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Path(path) if path.trim().is_empty() => {
                Err(DomainError::InvalidGeneratorReference {
                    value: format!("\"{path}\""),
                    kind: "string",
                })
            }
            _ => Ok(()),
        }
    }

    /// The declared generator name, or the component path as given.
    pub fn label(&self) -> &str {
        match self {
            Self::Generator(generator) => generator.name(),
            Self::Path(path) => path,
        }
    }
}

impl fmt::Debug for GeneratorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator(generator) => f.debug_tuple("Generator").field(&generator.name()).finish(),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

impl From<Arc<dyn Generator>> for GeneratorRef {
    fn from(generator: Arc<dyn Generator>) -> Self {
        Self::Generator(generator)
    }
}

impl From<&str> for GeneratorRef {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

pub(crate) type Completion = oneshot::Receiver<NosgResult<GenerateReport>>;

/// The file-writing handle given to one generator run.
///
/// Clones share the same run: the first [`generate`](Self::generate) call
/// across all clones settles it, later calls fail with
/// `GenerateAlreadyCalled` and never reach the engine.
#[derive(Clone)]
pub struct GenerateHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    generator: String,
    engine: Arc<dyn GenerateEngine>,
    calls: AtomicUsize,
    completion: Mutex<Option<oneshot::Sender<NosgResult<GenerateReport>>>>,
    runtime: Handle,
}

impl GenerateHandle {
    /// A handle over `engine` and the receiver its completion is sent to.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn new(
        generator: impl Into<String>,
        engine: Arc<dyn GenerateEngine>,
    ) -> NosgResult<(Self, Completion)> {
        let runtime = Handle::try_current().map_err(|e| NosgError::Internal {
            message: format!("generator runs need a tokio runtime: {e}"),
        })?;
        let (sender, receiver) = oneshot::channel();

        let handle = Self {
            inner: Arc::new(HandleInner {
                generator: generator.into(),
                engine,
                calls: AtomicUsize::new(0),
                completion: Mutex::new(Some(sender)),
                runtime,
            }),
        };

        Ok((handle, receiver))
    }

    /// Hand `files` to the engine. Returns once the write is scheduled.
    pub fn generate(&self, files: FileMap, options: WriteOptions) -> NosgResult<()> {
        let call = self.inner.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generator = %self.inner.generator, call, files = files.len(), "generate called");

        let sender = self
            .inner
            .completion
            .lock()
            .map_err(|_| NosgError::Internal {
                message: "generate handle lock poisoned".into(),
            })?
            .take();

        let Some(sender) = sender else {
            return Err(ApplicationError::GenerateAlreadyCalled {
                generator: self.inner.generator.clone(),
            }
            .into());
        };

        let engine = Arc::clone(&self.inner.engine);
        self.inner.runtime.spawn(async move {
            let result = engine.write(files, options).await;
            // The runner may have timed out and dropped the receiver.
            let _ = sender.send(result);
        });

        Ok(())
    }

    /// How many times `generate` was called, rejected calls included.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn generator(&self) -> &str {
        &self.inner.generator
    }
}

impl fmt::Debug for GenerateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateHandle")
            .field("generator", &self.inner.generator)
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}
