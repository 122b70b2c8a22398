use std::path::PathBuf;
use std::time::Instant;

use plate_ocr_engine::{NoopOcrEngine, OcrEngine, OcrRequest, ReplayOcrEngine, load_image};
use plate_ocr_types::{Detection, FilterResult};
use serde::Serialize;

use crate::cli::EngineChoice;
use crate::error::RunResult;
use crate::filter::filter_and_join;
use crate::settings::RunSettings;

/// Outcome of one image → OCR → filter pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub image: PathBuf,
    pub engine: &'static str,
    pub threshold: f32,
    pub detections: Vec<Detection>,
    #[serde(flatten)]
    pub result: FilterResult,
}

/// Build the OCR engine selected by `settings`.
///
/// `auto` picks the replay engine when a fixture is configured and tesseract
/// otherwise. A missing backend is an error; only `noop` yields the no-op engine.
/// Construction does not touch the backend: [`run`] warms it up once before recognizing.
pub fn engine_for(settings: &RunSettings) -> RunResult<Box<dyn OcrEngine>> {
    let engine: Box<dyn OcrEngine> = match (settings.engine, settings.replay.as_ref()) {
        (EngineChoice::Noop, _) => Box::new(NoopOcrEngine),
        (EngineChoice::Replay | EngineChoice::Auto, Some(path)) => {
            Box::new(ReplayOcrEngine::from_file(path)?)
        }
        (EngineChoice::Replay, None) => {
            return Err(plate_ocr_engine::OcrError::backend(
                "replay engine selected without a detections file",
            )
            .into());
        }
        (EngineChoice::Tesseract | EngineChoice::Auto, _) => tesseract_engine()?,
    };
    log::info!("selected OCR engine '{}'", engine.name());
    Ok(engine)
}

#[cfg(feature = "ocr-tesseract")]
fn tesseract_engine() -> RunResult<Box<dyn OcrEngine>> {
    Ok(Box::new(plate_ocr_engine::TesseractOcrEngine::new()))
}

#[cfg(not(feature = "ocr-tesseract"))]
fn tesseract_engine() -> RunResult<Box<dyn OcrEngine>> {
    Err(plate_ocr_engine::OcrError::backend(
        "tesseract support is not compiled in; rebuild with the \"ocr-tesseract\" feature",
    )
    .into())
}

/// Run one pass: load the image, recognize it, and filter the detections.
pub fn run(settings: &RunSettings, engine: &dyn OcrEngine) -> RunResult<RunReport> {
    let image = load_image(&settings.image)?;

    engine.warm_up()?;
    let started = Instant::now();
    let request = OcrRequest::new(&image, &settings.languages);
    let response = engine.recognize(&request)?;
    log::info!(
        "{} returned {} detections in {:.2?}",
        engine.name(),
        response.detections.len(),
        started.elapsed()
    );

    let result = filter_and_join(&response.detections, settings.threshold)?;
    log::debug!(
        "accepted {}/{} detections above {}",
        result.accepted.len(),
        response.detections.len(),
        settings.threshold
    );

    Ok(RunReport {
        image: settings.image.clone(),
        engine: engine.name(),
        threshold: settings.threshold,
        detections: response.detections,
        result,
    })
}
