//! OCR capability seam.
//!
//! The parser only ever sees text. Anything that can turn an image into text
//! implements [`OcrCapability`]; whether such an engine could be set up is
//! decided once, when an [`OcrAvailability`] is built, and carried from there.

#[cfg(feature = "native")]
mod pure_engine;
mod static_text;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;
pub use static_text::StaticTextOcr;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Recognized text of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrText {
    /// Full text, one visual row per line.
    pub text: String,
    /// Mean recognition confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Something that can read text off an image.
pub trait OcrCapability: Send + Sync {
    /// Engine name for logs and reports.
    fn name(&self) -> &str;

    /// Recognize the text in an image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrText, OcrError>;
}

/// An OCR engine, or the reason none could be set up.
pub enum OcrAvailability {
    Ready(Box<dyn OcrCapability>),
    Unavailable(String),
}

impl OcrAvailability {
    /// Wrap a ready engine.
    pub fn ready(engine: impl OcrCapability + 'static) -> Self {
        Self::Ready(Box::new(engine))
    }

    /// Try to load the native engine from the configured model directory.
    #[cfg(feature = "native")]
    pub fn from_config(config: &OcrConfig) -> Self {
        match PureOcrEngine::from_dir(&config.model_dir, config.clone()) {
            Ok(engine) => Self::ready(engine),
            Err(e) => {
                tracing::warn!("OCR engine unavailable: {}", e);
                Self::Unavailable(e.to_string())
            }
        }
    }

    /// Without the `native` feature there is no engine to load.
    #[cfg(not(feature = "native"))]
    pub fn from_config(_config: &OcrConfig) -> Self {
        Self::Unavailable("built without the native OCR engine".to_string())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for OcrAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(engine) => f.debug_tuple("Ready").field(&engine.name()).finish(),
            Self::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}

/// A recognized text fragment and its quadrilateral on the image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    /// Corner coordinates `[x1, y1, x2, y2, x3, y3, x4, y4]`.
    pub bbox: [f32; 8],
    pub text: String,
    pub confidence: f32,
}

impl TextRegion {
    fn top(&self) -> f32 {
        [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]]
            .into_iter()
            .fold(f32::INFINITY, f32::min)
    }

    fn bottom(&self) -> f32 {
        [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]]
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    fn left(&self) -> f32 {
        [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]]
            .into_iter()
            .fold(f32::INFINITY, f32::min)
    }

    fn center_y(&self) -> f32 {
        (self.top() + self.bottom()) / 2.0
    }
}

/// Rebuild text lines from detected regions.
///
/// Regions whose vertical centers lie within half a median region height of
/// each other form one visual row; a row's regions are joined left to right
/// with two spaces so table cells stay apart. Rows become lines, top to bottom.
pub fn assemble_lines(regions: &[TextRegion]) -> String {
    if regions.is_empty() {
        return String::new();
    }

    let mut heights: Vec<f32> = regions.iter().map(|r| r.bottom() - r.top()).collect();
    heights.sort_by(|a, b| a.total_cmp(b));
    let tolerance = (heights[heights.len() / 2] / 2.0).max(1.0);

    let mut sorted: Vec<&TextRegion> = regions.iter().collect();
    sorted.sort_by(|a, b| a.center_y().total_cmp(&b.center_y()));

    let mut rows: Vec<Vec<&TextRegion>> = Vec::new();
    for region in sorted {
        let same_row = rows
            .last()
            .is_some_and(|row| (region.center_y() - row[0].center_y()).abs() <= tolerance);
        if let (true, Some(row)) = (same_row, rows.last_mut()) {
            row.push(region);
        } else {
            rows.push(vec![region]);
        }
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by(|a, b| a.left().total_cmp(&b.left()));
            row.iter()
                .map(|r| r.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
