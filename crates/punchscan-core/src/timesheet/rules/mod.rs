//! Rule-based field matchers for punch clock, labor collection and generic text.
//!
//! Every matcher is a plain function from one line of text to an optional
//! [`FieldMatch`]. Matchers never fail: a line they do not recognize yields
//! `None`, and a line they recognize but cannot convert (an impossible
//! calendar date, say) yields a [`FieldValue::Rejected`] so the caller can
//! keep scanning while recording what was dropped.

pub mod datetime;
pub mod duration;
pub mod identifier;
pub mod labor_row;
pub mod name;
pub mod patterns;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::entry::Identifier;

pub use datetime::{parse_any_date, parse_clock, parse_datetime, parse_us_date};
pub use duration::hours_from_parts;
pub use identifier::clean_identifier;

/// Kinds of field a matcher can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Identifier,
    LaborType,
    Duration,
    Range,
    Date,
    TimePair,
    Name,
}

/// A single captured field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Identifier(Identifier),
    LaborType(String),
    /// Explicit duration in hours, rounded to two decimals.
    Duration(Decimal),
    Range {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Date(NaiveDate),
    /// Start and end clock times that still need a date.
    TimePair {
        start: NaiveTime,
        end: NaiveTime,
    },
    Name(String),
    /// The text had the field's shape but did not convert.
    Rejected { field: FieldKind, raw: String },
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Identifier(_) => FieldKind::Identifier,
            Self::LaborType(_) => FieldKind::LaborType,
            Self::Duration(_) => FieldKind::Duration,
            Self::Range { .. } => FieldKind::Range,
            Self::Date(_) => FieldKind::Date,
            Self::TimePair { .. } => FieldKind::TimePair,
            Self::Name(_) => FieldKind::Name,
            Self::Rejected { field, .. } => *field,
        }
    }
}

/// Fields captured by one matcher on one line, plus the raw substrings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMatch {
    pub fields: Vec<FieldValue>,
    pub raw: Vec<String>,
}

impl FieldMatch {
    pub fn single(value: FieldValue, raw: impl Into<String>) -> Self {
        Self {
            fields: vec![value],
            raw: vec![raw.into()],
        }
    }

    pub fn push(&mut self, value: FieldValue, raw: impl Into<String>) {
        self.fields.push(value);
        self.raw.push(raw.into());
    }
}

/// A named matcher function.
#[derive(Clone, Copy)]
pub struct Matcher {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<FieldMatch>,
}

impl Matcher {
    pub fn try_match(&self, line: &str) -> Option<FieldMatch> {
        (self.apply)(line)
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("name", &self.name).finish()
    }
}

/// Build a range field from two parsed endpoints, or a rejection when either failed.
pub(crate) fn range_field(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    raw: &str,
) -> FieldValue {
    match (start, end) {
        (Some(start), Some(end)) => FieldValue::Range { start, end },
        _ => FieldValue::Rejected {
            field: FieldKind::Range,
            raw: raw.to_string(),
        },
    }
}
