extern crate handlebars;

use handlebars::{RenderError, TemplateError};
use std::{error::Error as StdError, fmt, result::Result as StdResult};

#[derive(Debug)]
pub enum Error {
    Template(TemplateError),
    Render(RenderError),
    UnknownLanguage(String),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Template(err) => write!(f, "Error parsing template: {}", err),
            Error::Render(err) => write!(f, "Error rendering pull request body: {}", err),
            Error::UnknownLanguage(lang) => write!(f, "No file extension known for {}", lang),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::UnknownLanguage(_) => None,
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

pub(super) fn template_error(error: TemplateError) -> Error {
    Error::Template(error)
}
pub(super) fn render_error(error: RenderError) -> Error {
    Error::Render(error)
}
