//! Error types shared across the workspace.

use thiserror::Error;

/// Export of the canvas buffer to an image failed.
///
/// Surfaced to the caller (the upload flow); never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("canvas has zero area ({width}x{height}); nothing to export")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Configuration could not be loaded or is out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("canvas {width}x{height} exceeds the {max} px per side limit")]
    CanvasSize { width: u32, height: u32, max: u32 },

    #[error("brush width must be a positive finite number, got {0}")]
    BrushWidth(f32),

    #[error("endpoint base url must start with http:// or https://, got `{0}`")]
    BaseUrl(String),

    #[error("upload field `{0}` must not be empty")]
    EmptyField(&'static str),
}
