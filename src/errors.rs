use std::fmt;

use crate::constants::TOKEN_ENV_VAR;

#[derive(Debug)]
pub enum AppError {
    /// API token missing from the environment at startup
    MissingToken,
    /// Network request failed before a response was received
    NetworkError(String),
    /// Remote endpoint answered with a non-success status
    HttpStatus { status: u16, body: String },
    /// Failed to parse a JSON document
    ParseError(String),
    /// Invalid URL format
    UrlError(String),
    /// Invalid input format
    InvalidInput(String),
    /// IO operation failed
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingToken => {
                write!(
                    f,
                    "{TOKEN_ENV_VAR} not found; set it in the environment or a .env file"
                )
            }
            AppError::NetworkError(msg) => write!(f, "Network error: {msg}"),
            AppError::HttpStatus { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            AppError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AppError::UrlError(msg) => write!(f, "Invalid URL: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
