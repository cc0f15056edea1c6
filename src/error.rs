//! Error types.
//!
//! The reveal engine has no fallible operations; everything here comes from
//! talking to the generator backend or loading configuration.

use std::path::PathBuf;

/// Errors surfaced by the scenario client and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the body could not be decoded.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's `detail` when present, otherwise
    /// `Server error: {status}`.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Human-readable message.
        message: String,
    },

    /// The backend answered successfully but carried an `error` payload.
    #[error("{0}")]
    Backend(String),

    /// The selection is neither a known module nor `Random`.
    #[error("Invalid module selected: {0}")]
    UnknownModule(String),

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::Config`].
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// Terminal or file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure came from the backend exchange (as opposed to
    /// local configuration or I/O).
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Server { .. } | Self::Backend(_))
    }
}

/// Result alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
