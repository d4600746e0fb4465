//! Error types for the oubridge CLI

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for oubridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Directory API errors
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum ApiError {
    #[error("Authentication failed. Run `oubridge init` to re-authorize.")]
    Unauthorized,

    #[error("Access denied. The authorized account cannot read organizational units.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// OAuth authorization errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(
        "Credentials file not found: {0}. Download an OAuth client file from the \
         Google Cloud console and run `oubridge init`."
    )]
    MissingCredentials(PathBuf),

    #[error("Failed to parse credentials file: {0}")]
    InvalidCredentials(String),

    #[error("Authorization exchange failed: {0}")]
    ExchangeFailed(String),

    #[error("Token refresh failed: {0}. Run `oubridge init` to re-authorize.")]
    RefreshFailed(String),

    #[error("No cached token and no refresh token. Run `oubridge init` to authorize.")]
    NotAuthorized,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `oubridge init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Script generation errors
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Invalid root DN: {0:?} (ex. CN=domain,CN=com)")]
    InvalidRootDn(String),

    #[error(
        "The generated script is empty. This could be due to no/unavailable \
         organizational unit data in the Workspace tenant."
    )]
    NoOrgUnitData,
}
