//! `nosg run-generator`: run the generator a component declares.

use std::time::Duration;

use tracing::{debug, instrument};

use nosg_core::application::{GeneratorRef, RunRequest};
use nosg_core::domain::GeneratorOptions;

use crate::{cli::RunGeneratorArgs, error::CliResult};

use super::Context;

#[instrument(skip_all, fields(generator = %args.generator))]
pub async fn execute(args: RunGeneratorArgs, ctx: &Context) -> CliResult<()> {
    let options = match &args.options {
        Some(raw) => GeneratorOptions::from_json_str(raw)?,
        None => GeneratorOptions::new(),
    };
    let timeout = args
        .timeout
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.timeout());
    debug!(?timeout, "resolved generator timeout");

    let mut request = RunRequest::new(GeneratorRef::path(args.generator))
        .with_options(options)
        .with_timeout(timeout);
    if let Some(directory) = args.sources.sources_directory {
        request = request.in_directory(directory);
    }

    // NOTICE, SUCCESS and the file listing come from the runner.
    let report = ctx.runner.run(request).await?;
    ctx.output.json(&report)?;
    Ok(())
}
