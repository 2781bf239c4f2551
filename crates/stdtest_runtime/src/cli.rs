//! Command-line configuration.

use std::path::PathBuf;

use thiserror::Error;
use tracing::Level;

use crate::loader::DEFAULT_FILE;

/// Errors in command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// An option that takes a value was last on the command line.
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    /// An option that is not recognized.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// `--emit` was combined with more than one input.
    #[error("--emit takes exactly one input, got {0}")]
    EmitNeedsOneInput(usize),
}

/// Where a suite is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input, named by `-`.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl From<&str> for Input {
    fn from(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// What to print for each loaded input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One line per token.
    #[default]
    Tokens,
    /// One line per test case.
    Cases,
}

/// CLI configuration parsed from arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Inputs in command-line order.
    pub inputs: Vec<Input>,
    /// What to print per input. The last of `-t` and `-c` wins.
    pub mode: OutputMode,
    /// Where to write the `MessagePack` suite, if anywhere.
    pub emit: Option<PathBuf>,
    /// Start the REPL after processing inputs.
    pub interactive: bool,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// Print help and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
}

impl CliConfig {
    /// Returns the maximum log level for the verbosity.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Parses command-line arguments, skipping the program name.
///
/// Without inputs the default file is used, unless the REPL was requested.
///
/// # Errors
///
/// Returns an error for unknown options, options missing their value, or
/// `--emit` with more than one input.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::default();
    let mut only_paths = false;

    let mut args = args.iter().map(AsRef::<str>::as_ref).skip(1);
    while let Some(arg) = args.next() {
        if only_paths {
            config.inputs.push(Input::File(PathBuf::from(arg)));
            continue;
        }
        match arg {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-t" | "--tokens" => config.mode = OutputMode::Tokens,
            "-c" | "--cases" => config.mode = OutputMode::Cases,
            "-i" | "--interactive" => config.interactive = true,
            "-f" | "--file" => {
                let path = args.next().ok_or(CliError::MissingValue("--file"))?;
                config.inputs.push(Input::from(path));
            }
            "--emit" => {
                let path = args.next().ok_or(CliError::MissingValue("--emit"))?;
                config.emit = Some(PathBuf::from(path));
            }
            "--" => only_paths = true,
            "-" => config.inputs.push(Input::Stdin),
            flags if is_verbosity(flags) => {
                let count = u8::try_from(flags.len() - 1).unwrap_or(u8::MAX);
                config.verbosity = config.verbosity.saturating_add(count);
            }
            "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            arg if arg.starts_with('-') => {
                return Err(CliError::UnknownOption(arg.to_string()));
            }
            path => config.inputs.push(Input::from(path)),
        }
    }

    if config.inputs.is_empty() && !config.interactive {
        config.inputs.push(Input::File(PathBuf::from(DEFAULT_FILE)));
    }

    if config.emit.is_some() && config.inputs.len() != 1 {
        return Err(CliError::EmitNeedsOneInput(config.inputs.len()));
    }

    Ok(config)
}

/// Matches `-v`, `-vv`, `-vvv`, and so on.
fn is_verbosity(arg: &str) -> bool {
    arg.strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b == b'v'))
}
