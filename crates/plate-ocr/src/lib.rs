//! Read the text on an image and keep only the fragments the OCR engine is
//! confident about.
//!
//! The flow is image → [`plate_ocr_engine::OcrEngine`] → [`filter_and_join`]
//! → report. Everything a run needs travels in [`RunSettings`]; there is no
//! process-wide state.

pub mod cli;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod settings;

pub use error::{RunError, RunResult};
pub use filter::{FilterError, filter_and_join};
pub use pipeline::{RunReport, engine_for, run};
pub use plate_ocr_types::{Detection, FilterResult, Region};
pub use settings::{ConfigError, RunSettings, resolve_settings};
