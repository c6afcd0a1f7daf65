//! Whole-row matchers for labor collection report tables.
//!
//! A report row carries order number, labor type, start, end and hours in one
//! line:
//!
//! ```text
//! SO24-02365-21800  RegularTime  6/6/2025 10:23:00 AM  6/6/2025 2:33:00 PM  4 Hours 10 Minutes
//! ```
//!
//! The variants below go from exact spacing down to rows where OCR merged
//! columns, swapped tabs in, or read underlines as `_`.

use regex::{Captures, Regex};

use super::datetime::parse_datetime;
use super::duration::duration_value;
use super::identifier::clean_identifier;
use super::patterns::{
    ROW_FLEX, ROW_LOOSE, ROW_STRICT, ROW_TAB, ROW_TIME_KEYWORD, ROW_UNDERSCORE, ROW_UNLABELED,
};
use super::{range_field, FieldMatch, FieldValue};
use crate::models::entry::Identifier;

fn row_from_captures(caps: &Captures<'_>, labor_group: Option<usize>) -> FieldMatch {
    // Columns after the optional labor type.
    let base = if labor_group.is_some() { 3 } else { 2 };
    let raw = caps[0].to_string();

    let mut row = FieldMatch::single(
        FieldValue::Identifier(Identifier::ServiceOrder(clean_identifier(&caps[1]))),
        caps[1].to_string(),
    );

    if let Some(group) = labor_group {
        let labor = caps[group].split_whitespace().collect::<Vec<_>>().join(" ");
        if !labor.is_empty() {
            row.push(FieldValue::LaborType(labor), &caps[group]);
        }
    }

    let start_raw = caps[base].trim();
    let end_raw = caps[base + 1].trim();
    row.push(
        range_field(parse_datetime(start_raw), parse_datetime(end_raw), &raw),
        format!("{start_raw} {end_raw}"),
    );

    let hours_raw = format!("{} Hours {} Minutes", &caps[base + 2], &caps[base + 3]);
    row.push(
        duration_value(&hours_raw, &caps[base + 2], &caps[base + 3], None),
        hours_raw.clone(),
    );

    row
}

fn labeled_row(re: &Regex, line: &str) -> Option<FieldMatch> {
    re.captures(line).map(|c| row_from_captures(&c, Some(2)))
}

/// Columns separated by plain whitespace, seconds present.
pub fn strict(line: &str) -> Option<FieldMatch> {
    labeled_row(&ROW_STRICT, line)
}

/// Underlined hours cell read as `_4 _Hours`.
pub fn underscore(line: &str) -> Option<FieldMatch> {
    labeled_row(&ROW_UNDERSCORE, line)
}

/// Any junk between date and meridiem, any single separator in the order number.
pub fn flex(line: &str) -> Option<FieldMatch> {
    labeled_row(&ROW_FLEX, line)
}

/// Tab-separated cells.
pub fn tab(line: &str) -> Option<FieldMatch> {
    labeled_row(&ROW_TAB, line)
}

/// Order number with arbitrary damage, `H...`/`M...` unit words.
pub fn loose(line: &str) -> Option<FieldMatch> {
    labeled_row(&ROW_LOOSE, line)
}

/// Labor type recognized by its `Time` suffix (`RegularTime`, `Over Time`).
pub fn time_keyword(line: &str) -> Option<FieldMatch> {
    labeled_row(&ROW_TIME_KEYWORD, line)
}

/// Labor type column lost entirely.
pub fn unlabeled(line: &str) -> Option<FieldMatch> {
    ROW_UNLABELED
        .captures(line)
        .map(|c| row_from_captures(&c, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timesheet::rules::FieldKind;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    /// (identifier, labor type, start, end, hours)
    type Row = (String, Option<String>, NaiveDateTime, NaiveDateTime, Decimal);

    fn row_of(m: Option<FieldMatch>) -> Option<Row> {
        let m = m?;
        let mut id = None;
        let mut labor = None;
        let mut range = None;
        let mut hours = None;
        for field in m.fields {
            match field {
                FieldValue::Identifier(i) => id = Some(i.as_str().to_string()),
                FieldValue::LaborType(l) => labor = Some(l),
                FieldValue::Range { start, end } => range = Some((start, end)),
                FieldValue::Duration(h) => hours = Some(h),
                _ => {}
            }
        }
        let (start, end) = range?;
        Some((id?, labor, start, end, hours?))
    }

    fn expected(labor: Option<&str>) -> Option<Row> {
        Some((
            "SO24-02365-21800".to_string(),
            labor.map(String::from),
            dt(6, 10, 23),
            dt(6, 14, 33),
            Decimal::from_str("4.17").unwrap(),
        ))
    }

    #[test]
    fn test_row_fixtures() {
        let cases: &[(fn(&str) -> Option<FieldMatch>, &str, Option<Row>)] = &[
            (
                strict,
                "SO24-02365-21800 RegularTime 6/6/2025 10:23:00 AM 6/6/2025 2:33:00 PM 4 Hours 10 Minutes",
                expected(Some("RegularTime")),
            ),
            (
                strict,
                "SO24-02365-21800 RegularTime 6/6/2025 10:23 AM 6/6/2025 2:33 PM 4 Hours 10 Minutes",
                None,
            ),
            (
                underscore,
                "SO24-02365-21800 RegularTime 6/6/2025 10:23:00 AM 6/6/2025 2:33:00 PM_4 _Hours 10 Minutes",
                expected(Some("RegularTime")),
            ),
            (
                flex,
                "$O24.02365.21800 RegularTime 6/6/2025 10:23 AM 6/6/2025 2:33 PM 4 Hours 10 Minutes",
                expected(Some("RegularTime")),
            ),
            (
                tab,
                "SO24-02365-21800\tRegularTime\t6/6/2025 10:23:00 AM\t6/6/2025 2:33:00 PM\t4 Hours 10 Minutes",
                expected(Some("RegularTime")),
            ),
            (
                loose,
                "SO24-O2365-2180O RegularTime 6/6/2025 10:23:00 AM 6/6/2025 2:33:00 PM 4 Hovrs 10 Mins",
                expected(Some("RegularTime")),
            ),
            (
                time_keyword,
                "SO24-02365-21800 Regular Time 6/6/2025 10:23:00 AM 6/6/2025 2:33:00 PM 4 hrs 10 min",
                expected(Some("Regular Time")),
            ),
            (
                unlabeled,
                "SO24-02365-21800 | 6/6/2025 10:23 AM | 6/6/2025 2:33 PM | 4 Hours 10 Minutes",
                expected(None),
            ),
            (unlabeled, "Total Hours 4 Hours 10 Minutes", None),
        ];

        for (matcher, line, want) in cases {
            assert_eq!(row_of(matcher(line)), *want, "line: {line}");
        }
    }

    #[test]
    fn test_row_with_bad_date_keeps_other_fields() {
        let m = strict(
            "SO24-02365-21800 RegularTime 13/45/2025 10:23:00 AM 6/6/2025 2:33:00 PM 4 Hours 10 Minutes",
        )
        .unwrap();
        let kinds: Vec<_> = m.fields.iter().map(FieldValue::kind).collect();
        assert_eq!(
            kinds,
            vec![FieldKind::Identifier, FieldKind::LaborType, FieldKind::Range, FieldKind::Duration]
        );
        assert!(matches!(m.fields[2], FieldValue::Rejected { .. }));
    }
}
