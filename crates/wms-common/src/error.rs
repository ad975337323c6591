//! Error types shared by the viewer crates.

use thiserror::Error;

/// Result type alias using WmsError.
pub type WmsResult<T> = Result<T, WmsError>;

/// Failures reaching the stores behind the WMS.
#[derive(Debug, Error)]
pub enum WmsError {
    #[error("{0}")]
    DatabaseError(String),

    #[error("{0}")]
    UpstreamError(String),
}
