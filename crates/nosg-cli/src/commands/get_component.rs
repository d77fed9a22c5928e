//! `nosg get-component`: resolve a component path to exactly one
//! component.

use tracing::instrument;

use nosg_core::domain::{Component, GeneratorSpec};

use crate::{cli::LookupArgs, error::CliResult, output::OutputManager};

use super::{Context, match_request};

#[instrument(skip_all, fields(component_path = %args.component_path))]
pub async fn execute(args: LookupArgs, ctx: &Context) -> CliResult<()> {
    let request = match_request(args)?;
    let component = ctx.resolver.resolve(&request).await?;

    if ctx.output.is_json() {
        ctx.output.json(&component)?;
    } else {
        describe(&component, &ctx.output)?;
    }
    Ok(())
}

fn describe(component: &Component, output: &OutputManager) -> std::io::Result<()> {
    output.header(&component.name)?;
    output.print(&format!("  path:        {}", component.path.display()))?;
    if let Some(description) = &component.description {
        output.print(&format!("  description: {description}"))?;
    }
    output.print(&format!("  generator:   {}", generator_summary(component)))
}

fn generator_summary(component: &Component) -> String {
    match &component.generator {
        None => "none".into(),
        Some(GeneratorSpec::Registered { id, defaults }) if defaults.is_empty() => id.clone(),
        Some(GeneratorSpec::Registered { id, defaults }) => {
            format!("{id} (defaults {})", defaults.to_json_string())
        }
        Some(GeneratorSpec::Template { files }) => match files.len() {
            1 => "template, 1 file".into(),
            n => format!("template, {n} files"),
        },
    }
}
