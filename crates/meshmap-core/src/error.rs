// ── Core error types ──
//
// Data access is fail-soft, so the only thing that can fail is setting the
// service up. The `From<meshmap_api::Error>` impl maps transport-layer
// failures into those terms.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot set up HTTP client: {reason}")]
    ClientSetup { reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<meshmap_api::Error> for CoreError {
    fn from(err: meshmap_api::Error) -> Self {
        match err {
            meshmap_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            other => CoreError::ClientSetup {
                reason: other.to_string(),
            },
        }
    }
}
