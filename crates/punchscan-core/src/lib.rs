//! Core library for time entry extraction from OCR'd timesheet images.
//!
//! This crate provides:
//! - Format classification (punch clock screens, labor collection reports, generic timesheets)
//! - Text normalization for common OCR confusions in order numbers
//! - Per-format matcher cascades and record assembly into time entries
//! - An OCR capability seam with a pure Rust engine behind the `native` feature

pub mod error;
pub mod extractor;
pub mod models;
pub mod ocr;
pub mod timesheet;

pub use error::{ExtractionError, OcrError, PunchscanError, Result};
pub use extractor::{ExtractionOutcome, TimesheetExtractor};
pub use models::config::{ExtractionConfig, OcrConfig, PunchscanConfig};
pub use models::entry::{EntryKind, Identifier, SourceFormat, TimeEntry};
pub use models::format::{DocumentFormat, FormatHint};
pub use ocr::{OcrAvailability, OcrCapability, OcrText, StaticTextOcr};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use timesheet::{
    classify, demo_entry, normalize_text, DemoReason, DiscardReason, DiscardedRecord,
    ParseReport, TimesheetParser,
};
