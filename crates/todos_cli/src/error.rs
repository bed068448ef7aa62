//! CLI error type and exit-code mapping.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

#[derive(Debug)]
pub enum CliError {
    /// No `--db` given and the platform has no data directory.
    NoDataDir,
    Io(std::io::Error),
    Logging(String),
    UnknownId(String),
    AmbiguousId { prefix: String, matches: usize },
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::UnknownId(_) | Self::AmbiguousId { .. } => ExitCode::from(1),
            _ => ExitCode::from(2),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(f, "cannot locate a data directory; pass --db <PATH>"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::UnknownId(prefix) => write!(f, "no todo matches id `{prefix}`"),
            Self::AmbiguousId { prefix, matches } => {
                write!(f, "id `{prefix}` matches {matches} todos; use more characters")
            }
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
