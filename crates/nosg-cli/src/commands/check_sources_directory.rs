//! `nosg check-sources-directory`: validate the sources directory.

use serde_json::json;
use tracing::instrument;

use crate::{cli::SourcesArgs, error::CliResult};

use super::Context;

/// The validator prints the SUCCESS line itself; JSON mode adds the
/// resolved path on stdout.
#[instrument(skip_all)]
pub async fn execute(args: SourcesArgs, ctx: &Context) -> CliResult<()> {
    let directory = ctx
        .matcher
        .validator()
        .validate(args.sources_directory.as_deref())
        .await?;

    ctx.output
        .json(&json!({ "sourcesDirectory": directory.path() }))?;
    Ok(())
}
