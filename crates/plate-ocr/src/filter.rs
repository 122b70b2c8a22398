//! Confidence filter and joiner.
//!
//! A detection is accepted only when its confidence is strictly greater than
//! the threshold; a confidence equal to the threshold is rejected.

use plate_ocr_types::{Detection, FilterResult};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("invalid threshold {threshold}: must be a finite number")]
    InvalidArgument { threshold: f32 },
    #[error("detection {index} has no {field}")]
    MalformedInput { index: usize, field: &'static str },
}

pub fn filter_and_join(
    detections: &[Detection],
    threshold: f32,
) -> Result<FilterResult, FilterError> {
    if !threshold.is_finite() {
        return Err(FilterError::InvalidArgument { threshold });
    }

    let mut accepted = Vec::new();
    for (index, detection) in detections.iter().enumerate() {
        let text = detection
            .text
            .as_deref()
            .ok_or(FilterError::MalformedInput {
                index,
                field: "text",
            })?;
        let confidence = detection.confidence.ok_or(FilterError::MalformedInput {
            index,
            field: "confidence",
        })?;

        if confidence > threshold {
            log::trace!("accept {text:?} ({confidence} > {threshold})");
            accepted.push(text.to_owned());
        } else {
            log::trace!("reject {text:?} ({confidence} <= {threshold})");
        }
    }

    Ok(FilterResult::from_accepted(accepted))
}
