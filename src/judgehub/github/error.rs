extern crate reqwest;
extern crate serde_json;

use serde_json::Value;
use std::{error::Error as StdError, fmt, result::Result as StdResult};

#[derive(Debug)]
pub enum Error {
    Builder(reqwest::Error),
    Network(reqwest::Error),
    Api {
        status: u16,
        message: String,
        errors: Vec<Value>,
    },
    NotFound(String),
    Decode(reqwest::Error),
    PullRequest(Vec<Value>),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builder(e) => write!(f, "Error building client: {}", e),
            Self::Network(e) => write!(f, "Error sending request: {}", e),
            Self::Api {
                status, message, ..
            } => write!(f, "GitHub API returned {}: {}", status, message),
            Self::NotFound(what) => write!(f, "Not found on GitHub: {}", what),
            Self::Decode(e) => write!(f, "Error decoding GitHub response: {}", e),
            Self::PullRequest(errors) => write!(
                f,
                "Pull request creation failed: {}",
                Value::Array(errors.clone())
            ),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Builder(e) | Self::Network(e) | Self::Decode(e) => Some(e),
            Self::Api { .. } | Self::NotFound(_) | Self::PullRequest(_) => None,
        }
    }
}

pub type Result<T> = StdResult<T, Error>;
