//! Table-structure fallback for labor collection reports.
//!
//! When no row matcher accepted anything, each line is checked for the
//! ingredients of a row in any order: an order number, two dates, two clock
//! times and an hours/minutes duration. The first two dates and times become
//! start and end.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::entry::{Identifier, SourceFormat, TimeEntry};

use super::assembler::{Assembled, DiscardReason, DiscardedRecord};
use super::rules::duration::duration_value;
use super::rules::patterns::{DATE_US, ORDER_ANYWHERE, TABLE_HOURS, TABLE_TIME};
use super::rules::{clean_identifier, parse_clock, parse_us_date, FieldValue};

fn clock_times(line: &str) -> Vec<Option<chrono::NaiveTime>> {
    TABLE_TIME
        .find_iter(line)
        .map(|m| {
            let token = m.as_str().trim();
            let (clock, meridiem) = token.split_at(token.len() - 2);
            parse_clock(clock.trim(), Some(meridiem))
        })
        .collect()
}

fn endpoint(date: &str, time: Option<chrono::NaiveTime>) -> Option<NaiveDateTime> {
    Some(parse_us_date(date)?.and_time(time?))
}

/// Scan every line for a complete table row.
pub fn extract_rows(text: &str, employee_name: &str) -> Assembled {
    let mut out = Assembled::default();

    for (index, line) in text.lines().enumerate() {
        let Some(order) = ORDER_ANYWHERE.captures(line) else {
            continue;
        };
        let dates: Vec<&str> = DATE_US.find_iter(line).map(|m| m.as_str()).collect();
        let times = clock_times(line);
        let Some(hours) = TABLE_HOURS.captures(line) else {
            continue;
        };
        if dates.len() < 2 || times.len() < 2 {
            continue;
        }

        let (Some(start), Some(end)) = (endpoint(dates[0], times[0]), endpoint(dates[1], times[1]))
        else {
            out.warnings.push(format!(
                "line {}: table row has an unreadable date or time",
                index + 1
            ));
            continue;
        };
        if end < start {
            out.discarded.push(DiscardedRecord {
                line: index,
                reason: DiscardReason::EndBeforeStart,
            });
            continue;
        }

        let duration = match duration_value(&hours[0], &hours[1], &hours[2], None) {
            FieldValue::Duration(h) => h,
            _ => {
                out.warnings.push(format!(
                    "line {}: could not read duration from \"{}\"",
                    index + 1,
                    &hours[0]
                ));
                continue;
            }
        };

        let identifier = Identifier::ServiceOrder(clean_identifier(&order[1]));
        debug!("Table row at line {}: {}", index, identifier);

        out.entries.push(TimeEntry {
            kind: identifier.kind(),
            identifier,
            employee_name: employee_name.to_string(),
            start: Some(start),
            end: Some(end),
            work_date: Some(start.date()),
            labor_type: None,
            duration_hours: duration,
            source_format: SourceFormat::LaborCollectionTable,
            demo: false,
            source_line: Some(index),
        });
    }

    out
}
