use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the Spotify accounts or web API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to spotify failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("spotify responded with {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("token lifetime of {0}s is out of range")]
    InvalidExpiry(i64),
}

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
}

impl VaultError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("spotify client id and secret are not set")]
    MissingCredentials,

    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    #[error("could not determine a config directory; pass --config explicitly")]
    NoConfigDir,

    #[error("settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
