use std::{borrow::Cow, io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Io error: {0}")]
    Io(#[from] io::Error),

    #[error("unable to access `{}`: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("github error: {0}")]
    Github(#[from] github::client::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("line {line}: expected at least {expected} columns but found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("csv input is empty, a header row is required")]
    MissingHeader,

    #[error("pagination stopped for `{username}`: {reason}")]
    Pagination {
        username: String,
        reason: Cow<'static, str>,
    },

    #[error("`{0}`")]
    Message(Cow<'static, str>),
}

impl Error {
    pub(crate) fn file<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }

    /// Network, HTTP or GraphQL failures reported by the Github client
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Github(e) if e.is_transport())
    }

    /// A Github response which could not be decoded into the expected shape
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Github(e) if e.is_decode())
    }
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}
