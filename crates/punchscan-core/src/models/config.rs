//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::entry::{REPORT_EMPLOYEE, UNKNOWN_EMPLOYEE};
use super::format::FormatHint;

/// Main configuration for punchscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PunchscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Time entry extraction configuration.
    pub extraction: ExtractionConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory holding `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: PathBuf,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,

    /// Text regions below this confidence are dropped (0.0 - 1.0).
    pub min_confidence: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            keep_unk: false,
            min_confidence: 0.0,
        }
    }
}

/// Time entry extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Format hint used when the caller does not pass one.
    pub default_hint: FormatHint,

    /// Run the text normalizer before classification.
    pub normalize: bool,

    /// Fail with an error instead of returning an empty result.
    pub strict: bool,

    /// Return one tagged demo entry when nothing could be extracted.
    pub demo_fallback: bool,

    /// Retry labor rows joined with the following line when OCR wrapped them.
    pub join_wrapped_rows: bool,

    /// How many leading lines are searched for a salutation name.
    pub salutation_scan_lines: usize,

    /// Employee name used when a record carries none.
    pub unknown_employee: String,

    /// Employee name for labor collection reports without a salutation.
    pub report_employee: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_hint: FormatHint::Auto,
            normalize: true,
            strict: false,
            demo_fallback: false,
            join_wrapped_rows: true,
            salutation_scan_lines: 10,
            unknown_employee: UNKNOWN_EMPLOYEE.to_string(),
            report_employee: REPORT_EMPLOYEE.to_string(),
        }
    }
}

impl PunchscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PunchscanConfig::default();
        config.extraction.strict = true;
        config.extraction.default_hint = FormatHint::LaborCollection;
        config.save(&path).unwrap();

        let loaded = PunchscanConfig::from_file(&path).unwrap();
        assert!(loaded.extraction.strict);
        assert_eq!(loaded.extraction.default_hint, FormatHint::LaborCollection);
        assert_eq!(loaded.extraction.salutation_scan_lines, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PunchscanConfig =
            serde_json::from_str(r#"{"extraction": {"demo_fallback": true}}"#).unwrap();
        assert!(config.extraction.demo_fallback);
        assert!(config.extraction.normalize);
        assert_eq!(config.extraction.unknown_employee, "Unknown Employee");
        assert_eq!(config.ocr.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PunchscanConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
