//! Image-level time entry extraction.
//!
//! Ties an OCR capability to the text parser and decides what a caller gets
//! when there is nothing to parse: an explicit "cannot extract" outcome by
//! default, an error in strict mode, or a tagged demo entry when the demo
//! fallback is switched on.

use std::path::Path;

use image::DynamicImage;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ExtractionError, OcrError, PunchscanError, Result};
use crate::models::config::{ExtractionConfig, PunchscanConfig};
use crate::models::entry::TimeEntry;
use crate::models::format::{DocumentFormat, FormatHint};
use crate::ocr::{OcrAvailability, OcrCapability};
use crate::timesheet::{demo_entry, DemoReason, ParseReport, TimesheetParser};

/// What an extraction produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// The parser ran; the entry list may still be empty.
    Parsed(ParseReport),
    /// No text could be obtained, so nothing was parsed.
    CannotExtract { reason: String },
    /// Synthetic placeholder entries, only with the demo fallback enabled.
    Demo {
        reason: DemoReason,
        entries: Vec<TimeEntry>,
    },
}

impl ExtractionOutcome {
    /// Entries of the outcome, empty when nothing could be extracted.
    pub fn entries(&self) -> &[TimeEntry] {
        match self {
            Self::Parsed(report) => &report.entries,
            Self::CannotExtract { .. } => &[],
            Self::Demo { entries, .. } => entries,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo { .. })
    }
}

/// OCR plus parsing for one configuration.
#[derive(Debug)]
pub struct TimesheetExtractor {
    ocr: OcrAvailability,
    parser: TimesheetParser,
}

impl TimesheetExtractor {
    pub fn new(ocr: OcrAvailability, config: ExtractionConfig) -> Self {
        Self {
            ocr,
            parser: TimesheetParser::with_config(config),
        }
    }

    /// Load the configured OCR engine and build an extractor around it.
    pub fn from_config(config: &PunchscanConfig) -> Self {
        Self::new(
            OcrAvailability::from_config(&config.ocr),
            config.extraction.clone(),
        )
    }

    pub fn parser(&self) -> &TimesheetParser {
        &self.parser
    }

    pub fn ocr_available(&self) -> bool {
        self.ocr.is_ready()
    }

    fn config(&self) -> &ExtractionConfig {
        self.parser.config()
    }

    /// Parse text that was already transcribed.
    pub fn extract_text(&self, text: &str, hint: FormatHint) -> Result<ExtractionOutcome> {
        let report = self.parser.parse(text, hint)?;
        if report.entries.is_empty() && self.config().demo_fallback {
            return Ok(self.demo(DemoReason::NoEntries, report.format));
        }
        Ok(ExtractionOutcome::Parsed(report))
    }

    /// Run OCR on a decoded image, then parse the text.
    pub fn extract_image(&self, image: &DynamicImage, hint: FormatHint) -> Result<ExtractionOutcome> {
        let engine: &dyn OcrCapability = match &self.ocr {
            OcrAvailability::Ready(engine) => engine.as_ref(),
            OcrAvailability::Unavailable(reason) => {
                return self.cannot_extract(DemoReason::OcrUnavailable, reason.clone(), hint);
            }
        };

        let ocr = match engine.recognize(image) {
            Ok(ocr) => ocr,
            Err(e) => {
                warn!("{} failed: {}", engine.name(), e);
                return self.cannot_extract(DemoReason::OcrFailed, e.to_string(), hint);
            }
        };

        if ocr.text.trim().is_empty() {
            return self.cannot_extract(DemoReason::NoText, "no text recognized".to_string(), hint);
        }

        info!(
            "{} read {} lines (confidence {:.2})",
            engine.name(),
            ocr.text.lines().count(),
            ocr.confidence
        );
        self.extract_text(&ocr.text, hint)
    }

    /// Decode image bytes (PNG, JPEG, ...) and extract.
    pub fn extract_image_bytes(&self, bytes: &[u8], hint: FormatHint) -> Result<ExtractionOutcome> {
        let image = image::load_from_memory(bytes)?;
        self.extract_image(&image, hint)
    }

    /// Open an image file and extract.
    pub fn extract_file(&self, path: &Path, hint: FormatHint) -> Result<ExtractionOutcome> {
        if !path.exists() {
            return self.cannot_extract(
                DemoReason::MissingFile,
                format!("file not found: {}", path.display()),
                hint,
            );
        }
        let image = image::open(path)?;
        self.extract_image(&image, hint)
    }

    /// `format` is the classified format when text was parsed, else the forced hint.
    fn demo(&self, reason: DemoReason, format: DocumentFormat) -> ExtractionOutcome {
        warn!("Returning demo entry ({})", reason);
        ExtractionOutcome::Demo {
            reason,
            entries: vec![demo_entry(reason, format)],
        }
    }

    fn cannot_extract(
        &self,
        reason: DemoReason,
        message: String,
        hint: FormatHint,
    ) -> Result<ExtractionOutcome> {
        if self.config().demo_fallback {
            let format = hint.forced().unwrap_or(DocumentFormat::PunchClock);
            return Ok(self.demo(reason, format));
        }

        if self.config().strict {
            return Err(match reason {
                DemoReason::OcrUnavailable => OcrError::Unavailable(message).into(),
                DemoReason::OcrFailed => OcrError::Recognition(message).into(),
                DemoReason::MissingFile => PunchscanError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    message,
                )),
                DemoReason::NoText | DemoReason::NoEntries => ExtractionError::NoText.into(),
            });
        }

        warn!("Cannot extract: {}", message);
        Ok(ExtractionOutcome::CannotExtract { reason: message })
    }
}
