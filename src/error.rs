use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(atcoder_calendar::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(atcoder_calendar::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(atcoder_calendar::google_calendar))]
    GoogleCalendar(String),

    #[error("Contest listing error: {0}")]
    #[diagnostic(code(atcoder_calendar::listing))]
    Listing(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(atcoder_calendar::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(atcoder_calendar::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(atcoder_calendar::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(atcoder_calendar::other))]
    Other(String),
}

// Implement From for JSON errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create contest listing errors
pub fn listing_error(message: &str) -> Error {
    Error::Listing(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
