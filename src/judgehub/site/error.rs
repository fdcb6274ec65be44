extern crate reqwest;

use std::{error::Error as StdError, fmt, io, result::Result as StdResult};

#[derive(Debug)]
pub enum Error {
    Builder(reqwest::Error),
    Network(reqwest::Error),
    Io(io::Error),
    Policy(String),
    /// A terminal page state without a field needed to continue.
    Missing(&'static str),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builder(e) => write!(f, "Error building client: {}", e),
            Self::Network(e) => write!(f, "Error fetching page: {}", e),
            Self::Io(e) => write!(f, "Error reading page: {}", e),
            Self::Policy(id) => write!(
                f,
                "Contest problems are not uploaded. Open an issue if this is not a contest problem.\nProblem ID: {}",
                id
            ),
            Self::Missing(what) => write!(f, "Page has no {}", what),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Builder(e) | Self::Network(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Policy(_) | Self::Missing(_) => None,
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

pub(crate) fn network_error(err: reqwest::Error) -> Error {
    Error::Network(err)
}
