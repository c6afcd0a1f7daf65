//! Error types for the punchscan-core library.

use thiserror::Error;

/// Main error type for the punchscan library.
#[derive(Error, Debug)]
pub enum PunchscanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Time entry extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the OCR capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// No OCR engine could be set up for this extractor.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to time entry extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The OCR engine produced no text at all.
    #[error("no text could be extracted")]
    NoText,

    /// No entries were recognized and the caller asked for strict mode.
    #[error("no time entries found ({format})")]
    NoEntries { format: String },

    /// The format hint is not one of the supported values.
    #[error("unknown format hint: {0}")]
    UnknownFormatHint(String),
}

/// Result type for the punchscan library.
pub type Result<T> = std::result::Result<T, PunchscanError>;
