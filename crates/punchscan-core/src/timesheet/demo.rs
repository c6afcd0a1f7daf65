//! Tagged placeholder entries for the opt-in "never empty" mode.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::entry::{Identifier, SourceFormat, TimeEntry};
use crate::models::format::DocumentFormat;

/// Employee name carried by every demo entry.
pub const DEMO_EMPLOYEE: &str = "Demo Employee";

/// What kept the extractor from producing real entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoReason {
    MissingFile,
    OcrUnavailable,
    OcrFailed,
    NoText,
    NoEntries,
}

impl DemoReason {
    /// Upper-case tag used in the demo identifier.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MissingFile => "MISSING-FILE",
            Self::OcrUnavailable => "OCR-UNAVAILABLE",
            Self::OcrFailed => "OCR-FAILED",
            Self::NoText => "NO-TEXT",
            Self::NoEntries => "NO-ENTRIES",
        }
    }
}

impl fmt::Display for DemoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Build the single placeholder entry for a failed extraction.
pub fn demo_entry(reason: DemoReason, format: DocumentFormat) -> TimeEntry {
    let id = format!("DEMO-{}", reason.tag());
    let (identifier, duration_hours, source_format) = match format {
        DocumentFormat::PunchClock => (
            Identifier::ServiceOrder(id),
            Decimal::new(425, 2),
            SourceFormat::PunchClocks,
        ),
        DocumentFormat::LaborCollection => (
            Identifier::ServiceOrder(id),
            Decimal::new(425, 2),
            SourceFormat::LaborCollection,
        ),
        DocumentFormat::Generic => (
            Identifier::Category(id),
            Decimal::new(35, 1),
            SourceFormat::Generic,
        ),
    };

    TimeEntry {
        kind: identifier.kind(),
        identifier,
        employee_name: DEMO_EMPLOYEE.to_string(),
        start: None,
        end: None,
        work_date: None,
        labor_type: None,
        duration_hours,
        source_format,
        demo: true,
        source_line: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::EntryKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_service_order_demo() {
        let entry = demo_entry(DemoReason::NoText, DocumentFormat::PunchClock);
        assert_eq!(entry.identifier.as_str(), "DEMO-NO-TEXT");
        assert_eq!(entry.kind, EntryKind::ServiceOrder);
        assert_eq!(entry.duration_hours, Decimal::new(425, 2));
        assert_eq!(entry.employee_name, DEMO_EMPLOYEE);
        assert!(entry.demo);
    }

    #[test]
    fn test_generic_demo_is_category() {
        let entry = demo_entry(DemoReason::OcrUnavailable, DocumentFormat::Generic);
        assert_eq!(
            entry.identifier,
            Identifier::Category("DEMO-OCR-UNAVAILABLE".to_string())
        );
        assert_eq!(entry.kind, EntryKind::OtherTime);
        assert_eq!(entry.duration_hours, Decimal::new(35, 1));
    }

    #[test]
    fn test_is_pure() {
        let a = demo_entry(DemoReason::NoEntries, DocumentFormat::LaborCollection);
        let b = demo_entry(DemoReason::NoEntries, DocumentFormat::LaborCollection);
        assert_eq!(a, b);
    }
}
