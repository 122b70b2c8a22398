use plate_ocr_types::Detection;

/// Detections returned by one recognition pass, in engine order.
#[derive(Debug, Clone, Default)]
pub struct OcrResponse {
    pub detections: Vec<Detection>,
}

impl OcrResponse {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn empty() -> Self {
        Self {
            detections: Vec::new(),
        }
    }
}
