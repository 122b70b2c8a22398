mod backends;
mod engine;
mod error;
mod request;
mod response;
mod source;

pub use backends::replay::ReplayOcrEngine;
#[cfg(feature = "engine-tesseract")]
pub use backends::tesseract::{TesseractOcrConfig, TesseractOcrEngine};
pub use engine::{NoopOcrEngine, OcrEngine};
pub use error::OcrError;
pub use plate_ocr_types::{Detection, Region};
pub use request::OcrRequest;
pub use response::OcrResponse;
pub use source::load_image;
