//! Error types for the rundown renderer
//!
//! Only the asset stage and the file sink can fail. Layout, wrapping and
//! table drawing are total over well-typed input.

use thiserror::Error;

/// Custom error type for rundown rendering operations
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Failed to fetch background asset: {0}")]
    AssetFetch(String),

    #[error("Failed to decode background asset: {0}")]
    AssetDecode(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid document config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;

/// Helper to convert serde_json errors
impl From<serde_json::Error> for RendererError {
    fn from(err: serde_json::Error) -> Self {
        RendererError::JsonError(err.to_string())
    }
}

impl From<base64::DecodeError> for RendererError {
    fn from(err: base64::DecodeError) -> Self {
        RendererError::AssetDecode(format!("invalid base64 payload: {}", err))
    }
}

/// Conversion from RendererError to PyErr
#[cfg(feature = "python")]
impl From<RendererError> for pyo3::PyErr {
    fn from(err: RendererError) -> Self {
        match err {
            RendererError::IoError(_) => {
                pyo3::PyErr::new::<pyo3::exceptions::PyIOError, _>(err.to_string())
            }
            _ => pyo3::PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string()),
        }
    }
}
