//! `nosg list-matching-filepaths`: every file a component path matches.

use tracing::instrument;

use crate::{cli::LookupArgs, error::CliResult};

use super::{Context, match_request};

#[instrument(skip_all, fields(component_path = %args.component_path))]
pub async fn execute(args: LookupArgs, ctx: &Context) -> CliResult<()> {
    let request = match_request(args)?;
    let matches = ctx.matcher.list(&request).await?;

    // The matcher already logged the listing.
    ctx.output.json(&matches)?;
    Ok(())
}
