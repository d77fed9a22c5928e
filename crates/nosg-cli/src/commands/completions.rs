//! `nosg completions <shell>`: print a completion script on stdout.

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::CliResult;

const BIN: &str = "nosg";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), BIN, &mut std::io::stdout());
    Ok(())
}
