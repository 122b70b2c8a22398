use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Output};

use image::ImageFormat;
use serde::Deserialize;

use crate::{Detection, OcrEngine, OcrError, OcrRequest, OcrResponse, Region};

const ENGINE_NAME: &str = "tesseract";
const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Clone)]
pub struct TesseractOcrConfig {
    /// Executable to run; looked up on `PATH` when not absolute.
    pub binary: PathBuf,
    pub dpi: Option<u32>,
    /// Page segmentation mode. 11 = sparse text, which suits plates and signs.
    pub psm: Option<u32>,
    pub oem: Option<u32>,
}

impl Default for TesseractOcrConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            dpi: Some(150),
            psm: Some(11),
            oem: Some(3),
        }
    }
}

/// Word-level recognition through the `tesseract` command-line tool.
///
/// The image is handed over as a temporary PNG and the TSV report is read
/// back from the child's stdout, so nothing the tool prints reaches ours.
#[derive(Debug, Default)]
pub struct TesseractOcrEngine {
    config: TesseractOcrConfig,
}

impl TesseractOcrEngine {
    pub fn new() -> Self {
        Self::with_config(TesseractOcrConfig::default())
    }

    pub fn with_config(config: TesseractOcrConfig) -> Self {
        Self { config }
    }

    fn execute<I, S>(&self, args: I) -> Result<Output, OcrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(&self.config.binary)
            .args(args)
            .output()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => OcrError::backend(format!(
                    "tesseract executable '{}' not found; install tesseract or use --engine replay/noop",
                    self.config.binary.display()
                )),
                _ => OcrError::backend(format!(
                    "failed to run '{}': {err}",
                    self.config.binary.display()
                )),
            })
    }

    fn recognition_args(&self, languages: &[String]) -> Vec<String> {
        let mut args = vec!["-l".to_string(), tesseract_language(languages)];
        if let Some(psm) = self.config.psm {
            args.extend(["--psm".to_string(), psm.to_string()]);
        }
        if let Some(oem) = self.config.oem {
            args.extend(["--oem".to_string(), oem.to_string()]);
        }
        if let Some(dpi) = self.config.dpi {
            args.extend(["--dpi".to_string(), dpi.to_string()]);
        }
        args.push("tsv".to_string());
        args
    }
}

impl OcrEngine for TesseractOcrEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn warm_up(&self) -> Result<(), OcrError> {
        let output = self.execute(["--version"])?;
        if !output.status.success() {
            return Err(OcrError::backend(format!(
                "tesseract --version exited with {}",
                output.status
            )));
        }
        // Older releases print the banner on stderr.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let banner = String::from_utf8_lossy(&banner);
        log::info!("using {}", banner.lines().next().unwrap_or(ENGINE_NAME).trim());
        Ok(())
    }

    fn recognize(&self, request: &OcrRequest<'_>) -> Result<OcrResponse, OcrError> {
        let mut input = tempfile::Builder::new()
            .prefix("plate-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|err| OcrError::recognition(ENGINE_NAME, err.to_string()))?;
        request
            .image()
            .write_to(input.as_file_mut(), ImageFormat::Png)
            .map_err(|err| OcrError::recognition(ENGINE_NAME, err.to_string()))?;
        input
            .as_file_mut()
            .flush()
            .map_err(|err| OcrError::recognition(ENGINE_NAME, err.to_string()))?;

        let mut args = vec![
            input.path().as_os_str().to_owned(),
            OsStr::new("stdout").to_owned(),
        ];
        args.extend(
            self.recognition_args(request.languages())
                .into_iter()
                .map(Into::into),
        );
        let output = self.execute(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::recognition(
                ENGINE_NAME,
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let detections = parse_tsv(&output.stdout)?;
        log::debug!("tesseract returned {} words", detections.len());
        Ok(OcrResponse::new(detections))
    }
}

#[derive(Debug, Deserialize)]
struct TsvRow {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    conf: f32,
    #[serde(default)]
    text: String,
}

/// Parse tesseract's `tsv` report into word detections.
fn parse_tsv(report: &[u8]) -> Result<Vec<Detection>, OcrError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(report);

    let mut detections = Vec::new();
    for row in reader.deserialize::<TsvRow>() {
        let row = row.map_err(|err| {
            OcrError::recognition(ENGINE_NAME, format!("malformed tsv report: {err}"))
        })?;
        if let Some(detection) = word_to_detection(&row) {
            detections.push(detection);
        }
    }
    Ok(detections)
}

/// Joins requested languages the way tesseract expects (`eng+deu`), dropping
/// blanks and duplicates and falling back to English.
fn tesseract_language(languages: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::with_capacity(languages.len());
    for value in languages {
        let trimmed = value.trim();
        if trimmed.is_empty() || unique.contains(&trimmed) {
            continue;
        }
        unique.push(trimmed);
    }
    if unique.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        unique.join("+")
    }
}

/// Tesseract reports confidence in 0..=100 and uses -1 for rows that are not
/// words (pages, blocks, lines).
fn word_to_detection(row: &TsvRow) -> Option<Detection> {
    let text = row.text.trim();
    if text.is_empty() || !row.conf.is_finite() || row.conf < 0.0 {
        return None;
    }
    let region = Region::new(
        row.left as f32,
        row.top as f32,
        row.width as f32,
        row.height as f32,
    );
    Some(Detection::new(region, text).with_confidence((row.conf / 100.0).min(1.0)))
}
