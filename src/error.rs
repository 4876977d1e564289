//! Error types for map loading, image dumps and the window host.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaycastError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a stream that has no path
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// Map source contained no tile rows
    #[error("map source is empty")]
    EmptyMap,

    /// A map row holds a different number of tiles than the first row
    #[error("map row {line} has {actual} tiles, expected {expected}")]
    RaggedMap {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A tile number does not fit in a tile id
    #[error("tile value '{0}' is out of range")]
    InvalidTile(String),

    /// The map references a tile id the palette has no color for
    #[error("tile id {0} has no entry in the palette")]
    UnknownTile(u16),

    #[error("unsupported PPM type: {0}. Use 'P3' or 'P6'")]
    UnsupportedPpmFormat(String),

    /// Pixel buffer length does not match its dimensions
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Invalid numeric configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, RaycastError>;
