//! Source document formats and the caller-facing format hint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// The layout a piece of OCR text was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Mobile punch clock app: repeated order / elapsed / range / name blocks.
    #[serde(rename = "punch_clocks")]
    PunchClock,
    /// Tabular labor collection report.
    LaborCollection,
    /// Anything else; handled by the generic cascade.
    Generic,
}

impl DocumentFormat {
    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PunchClock => "punch_clocks",
            Self::LaborCollection => "labor_collection",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format hint supplied with the input text.
///
/// `Auto` runs the format classifier; every other value forces the named
/// cascade (its own fallbacks still apply).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatHint {
    #[default]
    Auto,
    PunchClocks,
    LaborCollection,
    Generic,
}

impl FormatHint {
    /// The forced format, or `None` for `Auto`.
    pub fn forced(&self) -> Option<DocumentFormat> {
        match self {
            Self::Auto => None,
            Self::PunchClocks => Some(DocumentFormat::PunchClock),
            Self::LaborCollection => Some(DocumentFormat::LaborCollection),
            Self::Generic => Some(DocumentFormat::Generic),
        }
    }
}

impl FromStr for FormatHint {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "auto" | "" => Ok(Self::Auto),
            // "standard" was the upload form's name for the punch clock layout
            "punch_clocks" | "punch_clock" | "standard" => Ok(Self::PunchClocks),
            "labor_collection" => Ok(Self::LaborCollection),
            "generic" => Ok(Self::Generic),
            _ => Err(ExtractionError::UnknownFormatHint(s.to_string())),
        }
    }
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.forced() {
            Some(format) => f.write_str(format.as_str()),
            None => f.write_str("auto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_parsing() {
        assert_eq!("auto".parse::<FormatHint>().unwrap(), FormatHint::Auto);
        assert_eq!("punch_clocks".parse::<FormatHint>().unwrap(), FormatHint::PunchClocks);
        assert_eq!("Labor-Collection".parse::<FormatHint>().unwrap(), FormatHint::LaborCollection);
        assert_eq!("standard".parse::<FormatHint>().unwrap(), FormatHint::PunchClocks);
        assert_eq!("generic".parse::<FormatHint>().unwrap(), FormatHint::Generic);
    }

    #[test]
    fn test_unknown_hint() {
        let err = "spreadsheet".parse::<FormatHint>().unwrap_err();
        assert_eq!(err, ExtractionError::UnknownFormatHint("spreadsheet".to_string()));
    }

    #[test]
    fn test_hint_display_round_trips() {
        for hint in [
            FormatHint::Auto,
            FormatHint::PunchClocks,
            FormatHint::LaborCollection,
            FormatHint::Generic,
        ] {
            assert_eq!(hint.to_string().parse::<FormatHint>().unwrap(), hint);
        }
    }
}
