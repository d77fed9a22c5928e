//! Output management and formatting.
//!
//! [`OutputManager`] is the CLI's [`LogSink`]: core services write their
//! `LEVEL: message` lines through it. Command results go through
//! [`OutputManager::print`] or [`OutputManager::json`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use nosg_core::application::ports::LogSink;
use nosg_core::domain::{LogLevel, messages::format_line};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Where command results and sink lines go, and how they look.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    stdout: Term,
    stderr: Term,
}

/// `Auto` becomes `Human` on a terminal and `Plain` when piped.
fn resolve_format(requested: OutputFormat, stdout_is_tty: bool) -> OutputFormat {
    match requested {
        OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        explicit => explicit,
    }
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = resolve_format(args.output_format, io::stdout().is_terminal());
        let no_color =
            args.no_color || config.output.no_color || resolved_format != OutputFormat::Human;

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Command result text; suppressed in quiet mode and in JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        self.stdout.write_line(msg)
    }

    /// Command result as pretty JSON on stdout, only in JSON mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        if !self.is_json() {
            return Ok(());
        }
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.stdout.write_line(&rendered)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.print(text)
        } else {
            self.print(&text.cyan().bold().to_string())
        }
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    /// One sink line, coloured prefix when colours are on.
    fn render(&self, level: LogLevel, message: &str) -> String {
        if self.no_color {
            return format_line(level, message);
        }
        let prefix = match level {
            LogLevel::Log => level.as_str().dimmed().to_string(),
            LogLevel::Notice => level.as_str().blue().bold().to_string(),
            LogLevel::Warn => level.as_str().yellow().bold().to_string(),
            LogLevel::Success => level.as_str().green().bold().to_string(),
        };
        format!("{prefix}: {message}\n")
    }

    fn passes(&self, level: LogLevel) -> bool {
        !self.quiet || level == LogLevel::Warn
    }
}

impl LogSink for OutputManager {
    fn write_line(&self, level: LogLevel, message: &str) {
        if !self.passes(level) {
            return;
        }
        // JSON mode keeps stdout machine-readable.
        let term = if self.is_json() {
            &self.stderr
        } else {
            &self.stdout
        };
        let _ = term.write_str(&self.render(level, message));
    }
}
