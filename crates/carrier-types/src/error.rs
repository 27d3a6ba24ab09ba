//! Error types for carrier-dashboard

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
}

/// Workspace-wide error.
///
/// The first five variants are the failure taxonomy surfaced to users; the
/// rest are plumbing errors that the services fold into that taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Identity creation failed: {0}")]
    IdentityCreationFailure(String),

    #[error("Profile creation failed: {0}")]
    ProfileCreationFailure(String),

    #[error("Unexpected failure: {0}")]
    UnexpectedFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Message suitable for a user-facing notification body.
    ///
    /// Taxonomy variants carry their message verbatim; everything else
    /// falls back to the full display string.
    pub fn user_message(&self) -> String {
        match self {
            Error::DataSourceUnavailable(msg)
            | Error::ParseFailure(msg)
            | Error::IdentityCreationFailure(msg)
            | Error::ProfileCreationFailure(msg)
            | Error::UnexpectedFailure(msg)
            | Error::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
