//! Generator Runner - runs one generator and waits for its files.
//!
//! The lifecycle of a run:
//! 1. Check the generator reference
//! 2. Validate the sources directory
//! 3. Resolve path references to a component and build its generator
//! 4. Merge `sourcesDirectory` under the caller options
//! 5. Invoke the generator with a fresh [`GenerateHandle`]
//! 6. Wait for the first `generate` call to finish, up to the timeout

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::generator::{GenerateHandle, Generator, GeneratorRef};
use crate::application::ports::{GenerateEngine, GeneratorFactory, LogSink};
use crate::application::services::ComponentResolver;
use crate::domain::{
    ComponentPath, GenerateReport, GeneratorOptions, SOURCES_DIRECTORY_KEY, messages,
};
use crate::error::NosgResult;

/// Command name used in run log lines.
pub const COMMAND: &str = "run-generator";

/// Program name used in run log lines.
pub const PROGRAM: &str = "nosg";

/// How long a run waits for its generator by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub generator: GeneratorRef,
    pub options: GeneratorOptions,
    pub sources_directory: Option<PathBuf>,
    pub timeout: Duration,
}

impl RunRequest {
    pub fn new(generator: impl Into<GeneratorRef>) -> Self {
        Self {
            generator: generator.into(),
            options: GeneratorOptions::new(),
            sources_directory: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.sources_directory = Some(directory.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct GeneratorRunner {
    resolver: Arc<ComponentResolver>,
    factory: Arc<dyn GeneratorFactory>,
    engine: Arc<dyn GenerateEngine>,
    program: String,
    sink: Arc<dyn LogSink>,
}

impl GeneratorRunner {
    /// Every runner built over the same `engine` shares it; runs stay
    /// isolated because each gets its own completion channel.
    pub fn new(
        resolver: Arc<ComponentResolver>,
        factory: Arc<dyn GeneratorFactory>,
        engine: Arc<dyn GenerateEngine>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            resolver,
            factory,
            engine,
            program: PROGRAM.to_string(),
            sink,
        }
    }

    /// Program name shown in log lines and timeout errors.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[instrument(skip_all, fields(generator = %request.generator.label(), timeout = ?request.timeout))]
    pub async fn run(&self, request: RunRequest) -> NosgResult<GenerateReport> {
        let RunRequest {
            generator: reference,
            options,
            sources_directory,
            timeout,
        } = request;

        reference.validate()?;

        let root = self
            .resolver
            .matcher()
            .validator()
            .validate(sources_directory.as_deref())
            .await?;

        let generator: Arc<dyn Generator> = match &reference {
            GeneratorRef::Generator(generator) => Arc::clone(generator),
            GeneratorRef::Path(path) => {
                let component_path = ComponentPath::new(path.as_str())?;
                let component = self
                    .resolver
                    .resolve_within(&component_path, None, &root)
                    .await?;
                self.factory.build(&component)?
            }
        };
        let label = reference.label();

        let mut defaults = GeneratorOptions::new();
        defaults.insert(
            SOURCES_DIRECTORY_KEY,
            root.path().to_string_lossy().into_owned(),
        );
        let options = options.merged_over(&defaults);
        let options_json = options.to_json_string();

        self.sink.notice(&messages::will_run_generator(
            &self.program,
            COMMAND,
            label,
            &options_json,
        ));

        let (handle, completion) = GenerateHandle::new(label, Arc::clone(&self.engine))?;
        generator.run(handle.clone(), options)?;

        let report = match tokio::time::timeout(timeout, completion).await {
            Ok(Ok(Ok(report))) => report.sorted(),
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "engine failed");
                return Err(e);
            }
            Ok(Err(_)) => {
                return Err(ApplicationError::GenerateFailed {
                    reason: "the engine stopped before reporting the written files".into(),
                }
                .into());
            }
            Err(_) => {
                warn!(calls = handle.call_count(), "generator run timed out");
                return Err(self.timeout_error(label, timeout, handle.call_count()).into());
            }
        };

        self.sink.success(&messages::has_run_generator(
            &self.program,
            COMMAND,
            label,
            &options_json,
        ));
        self.sink
            .log(&messages::generated_files_list(&report.written));

        info!(files = report.written.len(), "generator run completed");
        Ok(report)
    }

    fn timeout_error(&self, generator: &str, timeout: Duration, calls: usize) -> ApplicationError {
        let program = self.program.clone();
        let command = COMMAND.to_string();
        let generator = generator.to_string();
        let timeout_ms = timeout.as_millis();

        if calls == 0 {
            ApplicationError::GeneratorTimeoutNeverCalled {
                program,
                command,
                generator,
                timeout_ms,
            }
        } else {
            ApplicationError::GeneratorTimeoutNeverFinished {
                program,
                command,
                generator,
                timeout_ms,
            }
        }
    }
}
