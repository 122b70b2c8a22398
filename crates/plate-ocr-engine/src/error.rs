use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{engine} recognition failed: {message}")]
    Recognition {
        engine: &'static str,
        message: String,
    },
    #[error("failed to replay detections from {}: {message}", path.display())]
    Replay { path: PathBuf, message: String },
    #[error("backend error: {message}")]
    Backend { message: String },
}

impl OcrError {
    pub fn recognition(engine: &'static str, message: impl Into<String>) -> Self {
        Self::Recognition {
            engine,
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
