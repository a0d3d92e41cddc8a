use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to decode image {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image {}: {}", .path.display(), .source)]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input path: {0}")]
    InvalidPath(String),

    #[error("Invalid batch manifest {}: {}", .path.display(), .reason)]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Failed to load chart font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransformError {
    /// Decode failures are the only errors a batch recovers from
    pub fn is_decode(&self) -> bool {
        matches!(self, TransformError::Decode { .. })
    }
}
