//! Fixed-text OCR stand-in.

use image::DynamicImage;

use crate::error::OcrError;

use super::{OcrCapability, OcrText};

/// Punch clock screen as read from a clean screenshot.
const PUNCH_CLOCK_SAMPLE: &str = "Punch Clocks
Order Number: SO24-02365-21800
Elapsed Time: 04h:10m:00s
6/6/2025 11:23:00 AM - 6/6/2025 3:33:00 PM
Greg Clark

Order Number: SO02-11105-21723
Elapsed Time: 07h:51m:00s
6/5/2025 7:23:00 AM - 6/5/2025 3:14:00 PM
Greg Clark

Order Number: SO02-11105-21723
Elapsed Time: 07h:26m:00s
6/4/2025 7:42:00 AM - 6/4/2025 3:08:00 PM
Greg Clark

Order Number: SO02-11105-21723
Elapsed Time: 08h:07m:00s
6/3/2025 7:28:00 AM - 6/3/2025 3:35:00 PM
Greg Clark

Order Number: SO02-11105-21723
Elapsed Time: 22h:27m:00s
6/2/2025 9:01:00 AM - 6/3/2025 7:28:00 AM
Greg Clark";

/// Returns the same text for every image.
///
/// Used for tests, demos and for feeding previously transcribed text through
/// the image-level pipeline.
#[derive(Debug, Clone)]
pub struct StaticTextOcr {
    text: String,
}

impl StaticTextOcr {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Five-block punch clock screen for one employee.
    pub fn punch_clock_sample() -> Self {
        Self::new(PUNCH_CLOCK_SAMPLE)
    }
}

impl OcrCapability for StaticTextOcr {
    fn name(&self) -> &str {
        "static-text"
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<OcrText, OcrError> {
        Ok(OcrText {
            text: self.text.clone(),
            confidence: 1.0,
            processing_time_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_fixed_text() {
        let ocr = StaticTextOcr::new("hello");
        let out = ocr.recognize(&DynamicImage::new_rgb8(1, 1)).unwrap();
        assert_eq!(out.text, "hello");
        assert_eq!(out.confidence, 1.0);
    }

    #[test]
    fn test_sample_has_five_blocks() {
        let ocr = StaticTextOcr::punch_clock_sample();
        assert_eq!(ocr.text.matches("Order Number:").count(), 5);
    }
}
