use crate::{format, github, site};
use std::{error::Error as StdError, fmt, result::Result as StdResult};

/// Step of the upload flow an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    Formatting,
    Syncing,
    BranchResolution,
    Committing,
    PullRequesting,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parsing => "reading submission",
            Self::Formatting => "formatting",
            Self::Syncing => "syncing cache",
            Self::BranchResolution => "resolving base branch",
            Self::Committing => "committing",
            Self::PullRequesting => "opening pull request",
        })
    }
}

#[derive(Debug)]
pub enum Kind {
    Site(site::Error),
    Format(format::Error),
    GitHub(github::Error),
}
#[derive(Debug)]
pub struct Error {
    stage: Stage,
    kind: Kind,
}
pub type Result<T> = StdResult<T, Error>;

impl Error {
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn kind(&self) -> &Kind {
        &self.kind
    }
    pub(super) fn github(stage: Stage) -> impl FnOnce(github::Error) -> Error {
        move |err| Error {
            stage,
            kind: Kind::GitHub(err),
        }
    }
}
impl From<site::Error> for Error {
    fn from(err: site::Error) -> Self {
        Error {
            stage: Stage::Parsing,
            kind: Kind::Site(err),
        }
    }
}
impl From<format::Error> for Error {
    fn from(err: format::Error) -> Self {
        Error {
            stage: Stage::Formatting,
            kind: Kind::Format(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Site(x) => write!(f, "Error while {}: {}", self.stage, x),
            Kind::Format(x) => write!(f, "Error while {}: {}", self.stage, x),
            Kind::GitHub(x) => write!(f, "Error while {}: {}", self.stage, x),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            Kind::Site(x) => Some(x),
            Kind::Format(x) => Some(x),
            Kind::GitHub(x) => Some(x),
        }
    }
}
