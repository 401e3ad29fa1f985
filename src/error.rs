use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for map, tileset and image loading.
#[derive(Debug, Error)]
pub enum MapError {
    /// A map, tileset or config file could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A descriptor is not valid JSON or does not match the expected shape.
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        /// Descriptor that failed to parse.
        path: PathBuf,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A tile layer's data length does not match width * height.
    #[error("invalid layer size for layer '{layer}': expected {expected} tiles, found {actual}")]
    InvalidLayerSize {
        /// Layer name (may be empty).
        layer: String,
        /// `width * height`.
        expected: usize,
        /// `data.len()`.
        actual: usize,
    },
    /// The map is well-formed JSON but semantically invalid.
    #[error("invalid map: {0}")]
    InvalidMap(String),
    /// The tileset descriptor has neither a usable `image` nor `tiles`.
    #[error("invalid tileset {}: {reason}", path.display())]
    InvalidTileset {
        /// Tileset descriptor.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },
    /// An image referenced by a tileset could not be loaded or decoded.
    #[error("failed to load image {}: {source}", path.display())]
    ImageDecode {
        /// Resolved image path.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },
}
