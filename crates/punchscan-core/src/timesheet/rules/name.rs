//! Employee name matchers.

use super::patterns::{NAME_BARE, NAME_LABELED, SALUTATION_DEAR, SALUTATION_TO};
use super::{FieldMatch, FieldValue};

/// Capitalized words that show up as column headers or screen labels and
/// must never be taken for a first or last name.
const NOT_A_NAME: &[&str] = &[
    "Order", "Number", "Elapsed", "Time", "Punch", "Clocks", "Clock", "Labor", "Type", "Start",
    "End", "Hours", "Total", "Regular", "Overtime", "Date", "Service", "Collection", "Report",
    "Minutes", "Category",
];

fn name_match(raw: &str, name: &str) -> FieldMatch {
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    FieldMatch::single(FieldValue::Name(name), raw)
}

/// `Employee: Greg Clark`, `Technician Name - Ann Lee`
pub fn labeled(line: &str) -> Option<FieldMatch> {
    let caps = NAME_LABELED.captures(line)?;
    Some(name_match(&caps[0], &caps[1]))
}

/// A line holding only two capitalized words.
///
/// The cascade only runs this when the current record has no name yet.
pub fn bare(line: &str) -> Option<FieldMatch> {
    let trimmed = line.trim();
    let caps = NAME_BARE.captures(trimmed)?;
    if caps[1].split_whitespace().any(|w| NOT_A_NAME.contains(&w)) {
        return None;
    }
    Some(name_match(&caps[0], &caps[1]))
}

/// Find the addressee of a report (`Dear Greg Clark`, `To: Greg Clark`) in
/// the first `scan_lines` lines.
pub fn salutation(text: &str, scan_lines: usize) -> Option<String> {
    text.lines().take(scan_lines).find_map(|line| {
        let caps = SALUTATION_DEAR
            .captures(line)
            .or_else(|| SALUTATION_TO.captures(line))?;
        let name = caps[1]
            .split_whitespace()
            .map(|w| w.trim_end_matches('.'))
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!name.is_empty()).then_some(name)
    })
}
