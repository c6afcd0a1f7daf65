//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod classify;
pub mod config;
pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use punchscan_core::{
    ExtractionOutcome, FormatHint, OcrAvailability, PunchscanConfig, TimesheetExtractor,
};

/// Image extensions handed to OCR.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "tiff", "tif", "bmp"];

/// Extensions read as already transcribed text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// How an input file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Image,
}

impl InputKind {
    pub fn of(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Text)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("punchscan")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PunchscanConfig> {
    if let Some(path) = config_path {
        return Ok(PunchscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(PunchscanConfig::from_file(&default_path)?)
    } else {
        Ok(PunchscanConfig::default())
    }
}

/// Build an extractor, loading OCR models only when some input is an image.
pub fn build_extractor(config: &PunchscanConfig, needs_ocr: bool) -> TimesheetExtractor {
    if needs_ocr {
        TimesheetExtractor::from_config(config)
    } else {
        TimesheetExtractor::new(
            OcrAvailability::Unavailable("text input only".to_string()),
            config.extraction.clone(),
        )
    }
}

/// Extract time entries from one text or image file.
pub fn extract_path(
    path: &Path,
    extractor: &TimesheetExtractor,
    hint: FormatHint,
) -> anyhow::Result<ExtractionOutcome> {
    match InputKind::of(path) {
        Some(InputKind::Text) => {
            let text = fs::read_to_string(path)?;
            Ok(extractor.extract_text(&text, hint)?)
        }
        Some(InputKind::Image) => Ok(extractor.extract_file(path, hint)?),
        None => anyhow::bail!("Unsupported file format: {}", path.display()),
    }
}

/// Resolve a `--hint` argument against the configured default.
pub fn resolve_hint(arg: Option<&str>, config: &PunchscanConfig) -> anyhow::Result<FormatHint> {
    match arg {
        Some(hint) => Ok(hint.parse()?),
        None => Ok(config.extraction.default_hint),
    }
}
