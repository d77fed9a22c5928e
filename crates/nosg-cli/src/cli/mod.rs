//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nosg",
    bin_name = "nosg",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Locate components by convention and run their generators",
    long_about = "nosg resolves terse component paths (set/layer/component, \
                  layer/component, set:component or component) to files in a \
                  sources directory, and runs the generators those components \
                  declare.",
    after_help = "EXAMPLES:\n\
        \x20 nosg check-sources-directory\n\
        \x20 nosg list-matching-filepaths ui:button --layer atoms\n\
        \x20 nosg get-component atoms/button\n\
        \x20 nosg run-generator generators:new-atom --options '{\"name\": \"icon\"}'",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the sources directory exists and is a directory.
    #[command(
        visible_alias = "check",
        after_help = "EXAMPLES:\n\
            \x20 nosg check-sources-directory\n\
            \x20 nosg check-sources-directory --sources-directory ../design-system/sources"
    )]
    CheckSourcesDirectory(SourcesArgs),

    /// List the component files a component path matches.
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n\
            \x20 nosg list-matching-filepaths button\n\
            \x20 nosg list-matching-filepaths ui:button --layer atoms\n\
            \x20 nosg list-matching-filepaths '/abs/path/*/button.toml'"
    )]
    ListMatchingFilepaths(LookupArgs),

    /// Resolve a component path to exactly one component and show it.
    #[command(
        visible_alias = "get",
        after_help = "EXAMPLES:\n\
            \x20 nosg get-component ui/atoms/button\n\
            \x20 nosg get-component button --layer atoms"
    )]
    GetComponent(LookupArgs),

    /// Run the generator declared by a component.
    #[command(
        visible_alias = "run",
        after_help = "EXAMPLES:\n\
            \x20 nosg run-generator generators:new-atom --options '{\"name\": \"icon\"}'\n\
            \x20 nosg run-generator readme --options '{\"name\": \"card\"}' --timeout 2000"
    )]
    RunGenerator(RunGeneratorArgs),

    /// Write a default configuration file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 nosg init           # platform config directory\n\
            \x20 nosg init --local   # ./nosg.toml")]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 nosg completions bash > ~/.local/share/bash-completion/completions/nosg\n\
            \x20 nosg completions zsh  > ~/.zfunc/_nosg\n\
            \x20 nosg completions fish > ~/.config/fish/completions/nosg.fish")]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nosg config get sources.directory\n\
            \x20 nosg config list\n\
            \x20 nosg config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where to look for components.
#[derive(Debug, Clone, Args)]
pub struct SourcesArgs {
    /// Sources directory, relative to the current directory unless absolute.
    #[arg(
        short = 's',
        long = "sources-directory",
        value_name = "DIR",
        help = "Sources directory (default: from config, \"sources\")"
    )]
    pub sources_directory: Option<PathBuf>,
}

/// Arguments for the lookup commands.
#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    #[arg(value_name = "COMPONENT_PATH", help = "Component path to resolve")]
    pub component_path: String,

    /// Keep only matches in this layer. Ignored for absolute paths.
    #[arg(short = 'l', long = "layer", value_name = "LAYER")]
    pub layer: Option<String>,

    #[command(flatten)]
    pub sources: SourcesArgs,
}

// ── run-generator ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct RunGeneratorArgs {
    #[arg(
        value_name = "GENERATOR",
        help = "Component path of a component declaring a generator"
    )]
    pub generator: String,

    /// Options handed to the generator, as a JSON object.
    #[arg(short = 'o', long = "options", value_name = "JSON")]
    pub options: Option<String>,

    /// Milliseconds to wait for the generator to finish.
    #[arg(short = 't', long = "timeout", value_name = "MS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub sources: SourcesArgs,
}

// ── init / completions ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write ./nosg.toml instead of the per-user config file
    #[arg(long)]
    pub local: bool,

    /// Replace the file if it already exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to print the completion script for
    #[arg(value_enum)]
    pub shell: Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `sources.directory`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
