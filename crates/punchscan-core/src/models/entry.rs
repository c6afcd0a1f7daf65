//! Time entry data model.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder employee name for records assembled from line matches.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// Placeholder employee name for labor collection reports without a salutation.
pub const REPORT_EMPLOYEE: &str = "Current User";

/// What a time entry is booked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Identifier {
    /// Service order code, e.g. `SO24-02365-21800`.
    ServiceOrder(String),
    /// Category label for time not tied to an order.
    Category(String),
}

impl Identifier {
    /// The identifier text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ServiceOrder(s) | Self::Category(s) => s,
        }
    }

    /// Entry kind implied by this identifier.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::ServiceOrder(_) => EntryKind::ServiceOrder,
            Self::Category(_) => EntryKind::OtherTime,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    ServiceOrder,
    OtherTime,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceOrder => "service_order",
            Self::OtherTime => "other_time",
        }
    }
}

/// Which cascade or fallback produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    PunchClocks,
    LaborCollection,
    /// Single-line table fallback for labor collection reports.
    LaborCollectionTable,
    Generic,
    /// Generic cascade run after the punch clock cascade found nothing.
    GenericFallback,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PunchClocks => "punch_clocks",
            Self::LaborCollection => "labor_collection",
            Self::LaborCollectionTable => "labor_collection_table",
            Self::Generic => "generic",
            Self::GenericFallback => "generic_fallback",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconstructed work period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Order code or category label.
    pub identifier: Identifier,

    /// Employee name, or a sentinel when none was found.
    pub employee_name: String,

    /// Kind of entry, derived from the identifier.
    pub kind: EntryKind,

    /// Start of the period (second precision).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,

    /// End of the period (second precision).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,

    /// Calendar date the work was done on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_date: Option<NaiveDate>,

    /// Labor type column from labor collection reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_type: Option<String>,

    /// Elapsed time in hours, rounded to two decimals.
    pub duration_hours: Decimal,

    /// Cascade or fallback that produced this entry.
    pub source_format: SourceFormat,

    /// Synthetic placeholder from the demo generator.
    #[serde(default)]
    pub demo: bool,

    /// Zero-based line index that opened the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<usize>,
}

impl TimeEntry {
    /// Work date formatted as `YYYY-MM-DD`, empty when unknown.
    pub fn date_str(&self) -> String {
        self.work_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
