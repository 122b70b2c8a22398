use plate_ocr_engine::OcrError;
use thiserror::Error;

use crate::filter::FilterError;
use crate::settings::ConfigError;

pub type RunResult<T> = Result<T, RunError>;

/// Any failure that aborts a run. There is no partial-result recovery.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ocr(#[from] OcrError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
