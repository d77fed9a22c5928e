//! `nosg`: locate convention-named components and run their generators.
//!
//! Arguments are parsed before anything else, so `--help` and `--version`
//! never touch configuration. Tracing comes next, then the layered
//! configuration, then the command itself on a current-thread runtime.
//!
//! Exit codes: 0 success, 1 internal failure or generator timeout,
//! 2 invalid input, 3 sources directory or component not found,
//! 4 configuration.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::cli::{Cli, Commands};
use crate::commands::Context;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult, IntoCli};
use crate::output::OutputManager;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Before tracing, so RUST_LOG can come from .env as well.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(usage) => {
            let _ = usage.print();
            return ExitCode::from(if usage.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = logging::init_logging(&cli.global) {
        eprintln!("nosg: {e}");
        return ExitCode::FAILURE;
    }
    let verbose = cli.global.verbose > 0;
    debug!(global = ?cli.global, "arguments parsed");

    let config = match AppConfig::load(cli.global.config.as_deref())
        .with_cli_context(|| "Failed to load configuration")
    {
        Ok(config) => config,
        Err(e) => return report(e, verbose),
    };
    let output = OutputManager::new(&cli.global, &config);

    match run(cli, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e, verbose),
    }
}

fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "Failed to start the async runtime")?
        .block_on(dispatch(cli, config, output))
}

#[instrument(skip_all)]
async fn dispatch(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::CheckSourcesDirectory(args) => {
            commands::check_sources_directory::execute(args, &Context::new(config, output)).await
        }
        Commands::ListMatchingFilepaths(args) => {
            commands::list_matching_filepaths::execute(args, &Context::new(config, output)).await
        }
        Commands::GetComponent(args) => {
            commands::get_component::execute(args, &Context::new(config, output)).await
        }
        Commands::RunGenerator(args) => {
            commands::run_generator::execute(args, &Context::new(config, output)).await
        }
        Commands::Init(args) => commands::init::execute(args, &output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, cli.global.config.as_deref(), config, &output)
        }
    }
}

/// Print `err` to stderr and turn it into the process exit code.
fn report(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, std::io::stderr().is_terminal()));
    ExitCode::from(err.exit_code())
}
