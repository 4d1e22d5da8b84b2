//! Error types for diagram rendering
//!
//! Parsing and layout are best-effort and never fail; only the render
//! stage has failure modes, and only one of them — an invalid canvas —
//! represents a caller contract violation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Failed to parse generated SVG document")]
    SvgParse,

    #[error("Failed to allocate pixmap for raster rendering")]
    PixmapAlloc,

    #[error("Failed to encode PNG")]
    PngEncode,

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
