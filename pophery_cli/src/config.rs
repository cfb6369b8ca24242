//! Run configuration parsed from the command line

use std::path::PathBuf;

use pophery_vm::{OutputEncoding, Semantics};
use thiserror::Error;

/// How execution is traced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    #[default]
    Off,
    /// `[buffer]` before the run and after every step
    Text,
    /// One JSON snapshot per line
    Json,
}

/// Command line error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value for {option}: {reason}")]
    InvalidValue { option: String, reason: String },
}

/// Everything one invocation needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub semantics: Semantics,
    pub trace: TraceMode,
    pub encoding: OutputEncoding,
    /// Program text given with `-e`
    pub evaluate: Option<String>,
    pub files: Vec<PathBuf>,
    pub show_license: bool,
    pub show_help: bool,
}

impl RunConfig {
    /// Parse arguments, not including the program name
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = RunConfig::default();
        let mut args = args.into_iter();
        let mut options_done = false;

        while let Some(arg) = args.next() {
            if options_done || !arg.starts_with('-') || arg == "-" {
                config.files.push(PathBuf::from(arg));
                continue;
            }

            let (option, inline) = match arg.split_once('=') {
                Some((option, value)) if arg.starts_with("--") => {
                    (option.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };

            match option.as_str() {
                "--" => options_done = true,
                "-e" | "--evaluate" => {
                    config.evaluate = Some(value(&option, inline, &mut args)?);
                }
                "-s" | "--semantics" => {
                    let raw = value(&option, inline, &mut args)?;
                    config.semantics = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                        option: option.clone(),
                        reason,
                    })?;
                }
                "-t" | "--trace" => config.trace = TraceMode::Text,
                "--trace-json" => config.trace = TraceMode::Json,
                "-a" | "--ascii" => config.encoding = OutputEncoding::Ascii,
                "-l" | "--show-license" => config.show_license = true,
                "-h" | "--help" => config.show_help = true,
                _ => return Err(ConfigError::UnknownOption(arg)),
            }
        }

        Ok(config)
    }

    /// True when there is at least one program to run
    pub fn has_programs(&self) -> bool {
        self.evaluate.is_some() || !self.files.is_empty()
    }
}

fn value<I>(option: &str, inline: Option<String>, args: &mut I) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| args.next())
        .ok_or_else(|| ConfigError::MissingValue(option.into()))
}

pub const USAGE: &str = "\
Usage: pophery [options] [source.pophery ...]

Options:
  -e, --evaluate <program>   run the given program text
  -s, --semantics <0.1|-1>   opcode table to run under (default 0.1)
  -t, --trace                print the buffer before the run and after each step
      --trace-json           print a JSON snapshot after each step
  -a, --ascii                write output as ASCII with numeric character references
  -l, --show-license         show license and exit
  -h, --help                 show this help and exit

Lines beginning with '#' in source files are comments.";
