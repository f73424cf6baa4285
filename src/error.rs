use std::fmt;

use thiserror::Error;

/// Which side of a transfer an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Spotify,
    YouTube,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Spotify => write!(f, "Spotify"),
            Platform::YouTube => write!(f, "YouTube"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{platform} authentication required")]
    AuthRequired { platform: Platform },

    #[error("{platform} code exchange failed: {reason}")]
    AuthExchange { platform: Platform, reason: String },

    #[error("{platform} API error: {reason}")]
    Upstream { platform: Platform, reason: String },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn upstream(platform: Platform, reason: impl fmt::Display) -> Self {
        AppError::Upstream {
            platform,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
