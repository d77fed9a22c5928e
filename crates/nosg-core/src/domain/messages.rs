//! User-facing log and error messages.
//!
//! Every sentence nosg prints lives here so that the wording of a log line
//! and the `Display` of the matching error can never drift apart.

use std::fmt;
use std::path::{Path, PathBuf};

/// Severity prefix of a user-facing log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Log,
    Notice,
    Warn,
    Success,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [Self::Log, Self::Notice, Self::Warn, Self::Success];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "LOG",
            Self::Notice => "NOTICE",
            Self::Warn => "WARN",
            Self::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `LEVEL: message\n`, the wire format of every sink line.
pub fn format_line(level: LogLevel, message: &str) -> String {
    format!("{level}: {message}\n")
}

// ── sources directory ─────────────────────────────────────────────────────────

pub fn valid_sources_directory(path: &Path) -> String {
    format!("The sources directory at path \"{}\" is valid.", path.display())
}

pub fn unexistent_sources_directory(path: &Path, relative: bool) -> String {
    with_cwd_hint(
        format!(
            "\"{}\" is not a valid sources directory path. The directory doesn't seem to exist.",
            path.display()
        ),
        relative,
    )
}

pub fn not_a_directory_sources_directory(path: &Path, relative: bool) -> String {
    with_cwd_hint(
        format!(
            "\"{}\" is not a valid sources directory path. The path was found but it's not a directory.",
            path.display()
        ),
        relative,
    )
}

pub fn ensure_current_working_directory() -> &'static str {
    "Ensure that you are running the command in an appropriate current working directory."
}

fn with_cwd_hint(message: String, relative: bool) -> String {
    if relative {
        format!("{message} {}", ensure_current_working_directory())
    } else {
        message
    }
}

// ── component lookup ──────────────────────────────────────────────────────────

pub fn component_found(component_path: &str, file: &Path) -> String {
    format!(
        "Component \"{component_path}\" found at path \"{}\".",
        file.display()
    )
}

pub fn no_filepath_matching(component_path: &str) -> String {
    format!("No filepath matches the component path \"{component_path}\".")
}

pub fn many_filepaths_matching(component_path: &str, filepaths: &[PathBuf]) -> String {
    format!(
        "More than one filepath matches the component path \"{component_path}\".{} \
         Try to use a more accurate component path or a layer filter.",
        bullet_list(filepaths)
    )
}

pub fn component_not_found(component_path: &str, detail: &str, relative: bool) -> String {
    with_cwd_hint(
        format!("Component \"{component_path}\" not found. {detail}"),
        relative,
    )
}

pub fn matching_filepaths(component_path: &str, filepaths: &[PathBuf]) -> String {
    match filepaths.len() {
        0 => no_filepath_matching(component_path),
        1 => format!(
            "One filepath matches \"{component_path}\":{}",
            bullet_list(filepaths)
        ),
        _ => format!(
            "The filepaths matching \"{component_path}\" are:{}",
            bullet_list(filepaths)
        ),
    }
}

fn bullet_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\n\t- {}", p.display()))
        .collect()
}

// ── options and generators ────────────────────────────────────────────────────

pub fn invalid_option_shape(value: &str, kind: &str) -> String {
    format!("{value} ({kind}) is not a valid option object.")
}

pub fn invalid_generator(value: &str, kind: &str) -> String {
    format!(
        "{value} ({kind}) is not a valid generator value. Generator can be a generator \
         implementation or a component path to a component declaring a generator."
    )
}

pub fn generate_not_called_timeout(
    program: &str,
    command: &str,
    generator: &str,
    timeout_ms: u128,
) -> String {
    format!(
        "{program} {command} detected an error in the generator \"{generator}\". \
         The generator \"{generator}\" doesn't have called yet the generate function \
         after a timeout of {timeout_ms}ms. Try to increase the timeout option when using \
         {program} {command}, or check that the generator works correctly and actually \
         calls the generate function."
    )
}

pub fn generate_not_finished_timeout(
    program: &str,
    command: &str,
    generator: &str,
    timeout_ms: u128,
) -> String {
    format!(
        "{program} {command} detected an error in the generator \"{generator}\". \
         The generator \"{generator}\" generate instance doesn't have emitted yet a \
         finish event after a timeout of {timeout_ms}ms. Try to increase the timeout option \
         when using {program} {command}, or check that the generator works correctly \
         and actually calls the generate function."
    )
}

pub fn will_run_generator(program: &str, command: &str, generator: &str, options: &str) -> String {
    format!("{program} {command} will run the generator \"{generator}\" with the options {options}.")
}

pub fn has_run_generator(program: &str, command: &str, generator: &str, options: &str) -> String {
    format!(
        "{program} {command} correctly ran the generator \"{generator}\" with the options {options}."
    )
}

pub fn generated_files_list(files: &[PathBuf]) -> String {
    match files.len() {
        0 => "No file generated.".to_string(),
        1 => format!("The following file was generated:{}", bullet_list(files)),
        _ => format!("The following files were generated:{}", bullet_list(files)),
    }
}
