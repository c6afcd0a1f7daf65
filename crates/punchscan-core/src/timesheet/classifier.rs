//! Document format detection.

use crate::models::format::DocumentFormat;

use super::rules::patterns::{
    DURATION_COMPACT, ELAPSED_FUZZY, ELAPSED_STRICT, HEADER_END, HEADER_HOURS, HEADER_ORDER,
    HEADER_START, HEADER_TYPE, ORDER_LABELED_FUZZY, PUNCH_CLOCK_MARKER,
};

/// Whether a line carries every labor collection column title.
pub fn is_labor_header(line: &str) -> bool {
    HEADER_ORDER.is_match(line)
        && HEADER_TYPE.is_match(line)
        && HEADER_START.is_match(line)
        && HEADER_END.is_match(line)
        && HEADER_HOURS.is_match(line)
}

/// Find the labor collection header.
///
/// Returns the index of the last line belonging to the header, so scanning
/// can resume right after it. A header wrapped over two lines is found by
/// joining each line with its successor.
pub fn find_labor_header(lines: &[&str]) -> Option<usize> {
    for (i, line) in lines.iter().enumerate() {
        if is_labor_header(line) {
            return Some(i);
        }
        if let Some(next) = lines.get(i + 1) {
            if is_labor_header(&format!("{line} {next}")) {
                return Some(i + 1);
            }
        }
    }
    None
}

fn has_elapsed_token(text: &str) -> bool {
    ELAPSED_STRICT.is_match(text) || ELAPSED_FUZZY.is_match(text) || DURATION_COMPACT.is_match(text)
}

/// Decide which cascade applies to a document.
pub fn classify(text: &str) -> DocumentFormat {
    let lines: Vec<&str> = text.lines().collect();

    if find_labor_header(&lines).is_some() {
        return DocumentFormat::LaborCollection;
    }

    if PUNCH_CLOCK_MARKER.is_match(text) {
        return DocumentFormat::PunchClock;
    }

    let labeled_order = lines.iter().any(|l| ORDER_LABELED_FUZZY.is_match(l));
    if labeled_order && has_elapsed_token(text) {
        return DocumentFormat::PunchClock;
    }

    DocumentFormat::Generic
}
