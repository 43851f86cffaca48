// error.rs - Error types for the fallible edges of the engine
//
// Geometry never fails: degenerate strokes are skipped in place.
// Only configuration, color and tool parsing, and image export can go wrong.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("unknown tool `{0}`, expected drop, stylus or comb")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("vertex_count must be at least 3, got {0}")]
    TooFewVertices(usize),
    #[error("vertex_count must be at most {max}, got {got}")]
    TooManyVertices { got: usize, max: usize },
    #[error("physics.comb.half_span must be at most {max}, got {got}")]
    CombTooWide { got: u32, max: u32 },
    #[error("brush palette is empty")]
    EmptyPalette,
    #[error("brush radius range {min}..={max} is invalid")]
    BrushRange { min: f32, max: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("frame buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
