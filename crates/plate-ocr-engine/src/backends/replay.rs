use std::fs;
use std::path::Path;

use plate_ocr_types::Detection;

use crate::{OcrEngine, OcrError, OcrRequest, OcrResponse};

/// Engine that returns detections recorded in a JSON file instead of running a model.
///
/// The file holds an array of `{ "region": {..}, "text": "..", "confidence": 0.9 }`
/// objects. Missing `text` or `confidence` fields are kept as `None` so the
/// caller can reject them.
#[derive(Debug, Clone)]
pub struct ReplayOcrEngine {
    detections: Vec<Detection>,
}

impl ReplayOcrEngine {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OcrError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| OcrError::Replay {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let detections = Self::parse(&contents).map_err(|err| OcrError::Replay {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        log::debug!(
            "replay engine loaded {} detections from {}",
            detections.len(),
            path.display()
        );
        Ok(Self { detections })
    }

    pub fn from_detections(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    fn parse(contents: &str) -> Result<Vec<Detection>, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

impl OcrEngine for ReplayOcrEngine {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn recognize(&self, _: &OcrRequest<'_>) -> Result<OcrResponse, OcrError> {
        Ok(OcrResponse::new(self.detections.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::ReplayOcrEngine;
    use crate::{OcrEngine, OcrError, OcrRequest, Region};
    use image::DynamicImage;
    use std::fs;

    #[test]
    fn parses_fixture_and_keeps_missing_fields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detections.json");
        fs::write(
            &path,
            r#"[
                { "region": { "x": 1, "y": 2, "width": 30, "height": 10 }, "text": "AB12XYZ", "confidence": 0.9 },
                { "text": "--" }
            ]"#,
        )
        .unwrap();

        let engine = ReplayOcrEngine::from_file(&path).unwrap();
        let image = DynamicImage::new_luma8(1, 1);
        let languages = Vec::new();
        let response = engine
            .recognize(&OcrRequest::new(&image, &languages))
            .unwrap();

        assert_eq!(response.detections.len(), 2);
        assert_eq!(response.detections[0].region, Region::new(1.0, 2.0, 30.0, 10.0));
        assert_eq!(response.detections[0].confidence, Some(0.9));
        assert_eq!(response.detections[1].text.as_deref(), Some("--"));
        assert_eq!(response.detections[1].confidence, None);
    }

    #[test]
    fn invalid_json_is_a_replay_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ReplayOcrEngine::from_file(&path),
            Err(OcrError::Replay { .. })
        ));
    }
}
