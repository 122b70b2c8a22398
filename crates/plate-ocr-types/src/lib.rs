//! Shared domain models for the plate-ocr workspace.
//!
//! Keep this crate free of OCR or image dependencies so the engine crate and
//! the CLI can both depend on it without pulling native libraries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a detected fragment, in source pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// One recognized text fragment as produced by an OCR engine.
///
/// `text` and `confidence` are optional because not every producer is
/// trusted to fill them (replayed fixtures in particular). Consumers decide
/// whether a missing field is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl Detection {
    pub fn new(region: Region, text: impl Into<String>) -> Self {
        Self {
            region,
            text: Some(text.into()),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, value: f32) -> Self {
        self.confidence = Some(value);
        self
    }
}

/// Texts that passed the confidence filter, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterResult {
    pub accepted: Vec<String>,
    pub joined: String,
}

impl FilterResult {
    pub fn from_accepted(accepted: Vec<String>) -> Self {
        let joined = accepted.join(" ");
        Self { accepted, joined }
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}
