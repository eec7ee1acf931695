//! Renderer error types.

use sticker_core::CanvasError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Resource loading failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// The surface has nothing to capture.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Rasterization or encoding failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// A blocking task did not finish.
    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<RenderError> for CanvasError {
    fn from(err: RenderError) -> Self {
        Self::ResourceDecode(err.to_string())
    }
}
