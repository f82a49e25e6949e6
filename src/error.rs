//! Error types for the document renderer.
//!
//! Three kinds of failure matter to rendering: a missing icon asset (scoped to
//! one cell), a malformed table request, and anything the container engine
//! reports. The remaining variants cover configuration and model loading.

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a schema report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An embedded asset could not be read or registered
    #[error("Resource unavailable: {asset}: {reason}")]
    ResourceUnavailable {
        /// Logical asset path that was requested
        asset: String,
        /// Why the asset could not be provided
        reason: String,
    },

    /// A table was requested with an impossible shape
    #[error("Invalid table layout: {0}")]
    InvalidLayout(String),

    /// The container engine failed to create, populate or persist the document
    #[error("Container fault: {0}")]
    ContainerFault(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema model could not be deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::ResourceUnavailable`] for `asset`.
    pub fn resource_unavailable(asset: impl Into<String>, reason: impl ToString) -> Self {
        Error::ResourceUnavailable {
            asset: asset.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap any displayable engine failure as a [`Error::ContainerFault`].
    pub fn container(reason: impl std::fmt::Display) -> Self {
        Error::ContainerFault(reason.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ContainerFault(format!("zip: {}", err))
    }
}
