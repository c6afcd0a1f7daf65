//! WASM bindings for time entry extraction.
//!
//! The browser runs OCR itself and hands text (or positioned text boxes) to
//! these bindings, which return time entries as plain JS objects.

use wasm_bindgen::prelude::*;

use punchscan_core::models::config::ExtractionConfig;
use punchscan_core::models::format::FormatHint;
use punchscan_core::ocr::{assemble_lines, TextRegion};
use punchscan_core::timesheet::rules::duration::hours_between;
use punchscan_core::timesheet::rules::identifier::is_service_order;
use punchscan_core::timesheet::rules::{clean_identifier, parse_datetime};
use punchscan_core::timesheet::{classify, normalize_text, TimesheetParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_hint(hint: Option<String>) -> Result<FormatHint, JsValue> {
    match hint {
        Some(hint) => hint.parse().map_err(|e| JsValue::from_str(&format!("{}", e))),
        None => Ok(FormatHint::Auto),
    }
}

/// Extract time entries from OCR text.
///
/// `hint` is one of `auto`, `punch_clocks`, `labor_collection`, `generic`.
/// Returns the array of entries.
#[wasm_bindgen]
pub fn parse_time_entries(text: &str, hint: Option<String>) -> Result<JsValue, JsValue> {
    let report = TimesheetParser::new()
        .parse(text, parse_hint(hint)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&report.entries)
}

/// Detect the document format of OCR text.
#[wasm_bindgen]
pub fn classify_format(text: &str) -> String {
    classify(&normalize_text(text)).to_string()
}

/// Apply the OCR confusion fixes used before parsing.
#[wasm_bindgen]
pub fn normalize_ocr_text(text: &str) -> String {
    normalize_text(text)
}

/// Time entry extractor class for browser use.
#[wasm_bindgen]
pub struct TimeEntryExtractor {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl TimeEntryExtractor {
    /// Create an extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    #[wasm_bindgen]
    pub fn set_strict(&mut self, strict: bool) {
        self.config.strict = strict;
    }

    #[wasm_bindgen]
    pub fn set_normalize(&mut self, normalize: bool) {
        self.config.normalize = normalize;
    }

    #[wasm_bindgen]
    pub fn set_join_wrapped_rows(&mut self, join: bool) {
        self.config.join_wrapped_rows = join;
    }

    /// Set the hint used when `extract` is called without one.
    #[wasm_bindgen]
    pub fn set_default_hint(&mut self, hint: &str) -> Result<(), JsValue> {
        self.config.default_hint = parse_hint(Some(hint.to_string()))?;
        Ok(())
    }

    fn parser(&self) -> TimesheetParser {
        TimesheetParser::with_config(self.config.clone())
    }

    /// Extract entries from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let report = self
            .parser()
            .parse_auto(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        to_js(&report.entries)
    }

    /// Extract entries together with format, fallbacks, warnings and discarded records.
    #[wasm_bindgen]
    pub fn extract_with_report(&self, text: &str) -> Result<JsValue, JsValue> {
        let report = self
            .parser()
            .parse_auto(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        to_js(&report)
    }
}

impl Default for TimeEntryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text boxes from browser-side OCR.
#[wasm_bindgen]
pub struct OcrRegions {
    regions: Vec<TextRegion>,
    text: String,
}

#[wasm_bindgen]
impl OcrRegions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a text box with its four corners.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_box(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.regions.push(TextRegion {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
        });
    }

    /// Set the full text, overriding the boxes.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Full text, rebuilt row by row from the boxes unless set explicitly.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.text.is_empty() {
            assemble_lines(&self.regions)
        } else {
            self.text.clone()
        }
    }

    /// Extract time entries from this OCR result.
    #[wasm_bindgen]
    pub fn extract_entries(&self, hint: Option<String>) -> Result<JsValue, JsValue> {
        parse_time_entries(&self.get_text(), hint)
    }
}

impl Default for OcrRegions {
    fn default() -> Self {
        Self::new()
    }
}

/// Helpers for form fields in the front end.
#[wasm_bindgen]
pub struct TimeEntryUtils;

#[wasm_bindgen]
impl TimeEntryUtils {
    /// Clean an order number as typed or read by OCR (`$O24-O2365-21800` -> `SO24-02365-21800`).
    #[wasm_bindgen]
    pub fn clean_order_number(raw: &str) -> String {
        clean_identifier(raw)
    }

    /// Whether the cleaned text is a complete `SO##-#####-#####` number.
    #[wasm_bindgen]
    pub fn is_valid_order_number(raw: &str) -> bool {
        is_service_order(&clean_identifier(raw))
    }

    /// Hours between two `M/D/YYYY h:mm[:ss] AM|PM` timestamps, rounded to two decimals.
    #[wasm_bindgen]
    pub fn hours_between(start: &str, end: &str) -> Option<f64> {
        let start = parse_datetime(start)?;
        let end = parse_datetime(end)?;
        hours_between(start, end).and_then(|h| h.to_string().parse().ok())
    }

    /// Format decimal hours as `4h 10m`.
    #[wasm_bindgen]
    pub fn format_hours(hours: f64) -> String {
        let minutes = (hours * 60.0).round() as i64;
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const SCREEN: &str = "Punch Clocks\nOrder Number: SO24-02365-21800\nElapsed Time: 04h:10m:00s\n6/6/2025 11:23:00 AM - 6/6/2025 3:33:00 PM\nGreg Clark";

    #[wasm_bindgen_test]
    fn test_classify_format() {
        assert_eq!(classify_format(SCREEN), "punch_clocks");
        assert_eq!(classify_format("hello world"), "generic");
    }

    #[wasm_bindgen_test]
    fn test_normalize_ocr_text() {
        assert_eq!(normalize_ocr_text("$O24-O2365-21800"), "$O24-02365-21800");
    }

    #[wasm_bindgen_test]
    fn test_clean_order_number() {
        assert_eq!(TimeEntryUtils::clean_order_number("$O24-O2365-21800"), "SO24-02365-21800");
        assert!(TimeEntryUtils::is_valid_order_number("$O24.O2365.21800"));
        assert!(!TimeEntryUtils::is_valid_order_number("4471-B2"));
    }

    #[wasm_bindgen_test]
    fn test_hours_between() {
        let hours = TimeEntryUtils::hours_between("6/6/2025 11:23:00 AM", "6/6/2025 3:33:00 PM");
        assert!((hours.unwrap() - 4.17).abs() < 0.001);
        assert!(TimeEntryUtils::hours_between("6/6/2025 3:33 PM", "6/6/2025 11:23 AM").is_none());
    }

    #[wasm_bindgen_test]
    fn test_format_hours() {
        assert_eq!(TimeEntryUtils::format_hours(4.17), "4h 10m");
        assert_eq!(TimeEntryUtils::format_hours(22.45), "22h 27m");
    }

    #[wasm_bindgen_test]
    fn test_ocr_regions_text() {
        let mut regions = OcrRegions::new();
        regions.add_box("Order Number:", 0.0, 0.0, 100.0, 0.0, 100.0, 20.0, 0.0, 20.0, 0.9);
        regions.add_box("SO24-02365-21800", 120.0, 2.0, 260.0, 2.0, 260.0, 22.0, 120.0, 22.0, 0.9);
        assert_eq!(regions.get_text(), "Order Number:  SO24-02365-21800");

        regions.set_text("override");
        assert_eq!(regions.get_text(), "override");
    }

    #[wasm_bindgen_test]
    fn test_parse_time_entries() {
        assert!(parse_time_entries(SCREEN, None).is_ok());
        assert!(parse_time_entries(SCREEN, Some("spreadsheet".into())).is_err());
    }
}
