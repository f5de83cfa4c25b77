// crates/atlas-core/src/error.rs
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Top-level error type of `atlas-core`.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

/// Failure of a single HTTP exchange, before any status is known.
#[derive(Debug, Clone, Error)]
#[error("request to {url} failed: {message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
}

/// Why the dataset could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The host could not be reached at all.
    #[error("could not reach {url}: {message}")]
    Connectivity { url: String, message: String },

    /// The server answered, but not with a success status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not JSON, or not an array of records.
    #[error("unexpected payload: {message}")]
    Payload { message: String },

    /// A local snapshot could not be read.
    #[error("could not read snapshot {path}: {message}")]
    Snapshot { path: String, message: String },
}

impl LoadError {
    /// `true` when the failure happened on our side of the wire.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, LoadError::Connectivity { .. })
    }

    /// Message shown to the user next to the retry control.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Connectivity { .. } => {
                "Could not reach the country service. Check your internet connection and try again."
            }
            LoadError::Status { .. } | LoadError::Payload { .. } => {
                "The country service is unavailable right now. Please try again later."
            }
            LoadError::Snapshot { .. } => {
                "The local country dataset could not be read. Check the file and try again."
            }
        }
    }
}

impl From<TransportError> for LoadError {
    fn from(e: TransportError) -> Self {
        LoadError::Connectivity {
            url: e.url,
            message: e.message,
        }
    }
}

/// Failure of the key/value store backing the favorites.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// A view could not be produced from a record.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no country with code {0}")]
    UnknownCountry(String),

    #[error("{code} has coordinates outside the globe")]
    InvalidCoordinates { code: String },

    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}
