//! Diagnostics subscriber for the `nosg` binary.
//!
//! The library crates emit spans and events and never install anything;
//! this module is the only place a subscriber is set up. Diagnostics always
//! go to stderr, away from the `LEVEL: message` lines of `output`.
//!
//! `RUST_LOG` replaces the flag-derived filter entirely when it is set.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::cli::GlobalArgs;

/// Targets that share the flag-derived level. Everything else stays off.
const CRATES: [&str; 3] = ["nosg", "nosg_core", "nosg_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => crate_filter(level_for(args))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber could not be installed: {e}"))
}

/// `--quiet` wins over any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn crate_filter(level: LevelFilter) -> Result<EnvFilter, ParseError> {
    let directives: Vec<String> = CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect();
    EnvFilter::builder().parse(directives.join(","))
}
