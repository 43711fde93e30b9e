use crate::parse;
use reqwest::StatusCode;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Parse(parse::Error),
    Request(reqwest::Error),
    Status { page: u32, status: StatusCode },
    Clean(String),
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Chart(String),
}

impl Error {
    pub fn config_error(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {e}"),
            Error::Request(e) => write!(f, "Request error: {e}"),
            Error::Status { page, status } => {
                write!(f, "Request error: page {page} answered with {status}")
            }
            Error::Clean(msg) => write!(f, "Clean error: {msg}"),
            Error::Config(msg) => write!(f, "Config error: {msg}"),
            Error::Io(e) => write!(f, "Io error: {e}"),
            Error::Json(e) => write!(f, "Json error: {e}"),
            Error::Chart(msg) => write!(f, "Chart error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Request(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Status { .. } | Error::Clean(_) | Error::Config(_) | Error::Chart(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
