//! Error types for sticker editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in editor operations.
///
/// Missing mutation targets are deliberately absent here: the editor treats
/// them as no-ops rather than failures.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Shape name outside the supported set.
    #[error("Unknown shape kind: {0}")]
    UnknownShape(String),

    /// Border style name outside the supported set.
    #[error("Unknown border style: {0}")]
    UnknownBorderStyle(String),

    /// No default template carries this id.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Scene/document serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An uploaded image could not be decoded.
    #[error("Failed to decode image: {0}")]
    ResourceDecode(String),
}
