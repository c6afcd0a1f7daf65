//! Elapsed duration matchers.

use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use rust_decimal::{Decimal, RoundingStrategy};

use super::patterns::{
    DURATION_COMPACT, DURATION_DECIMAL, DURATION_LABELED_CLOCK, DURATION_VERBOSE, ELAPSED_FUZZY,
    ELAPSED_STRICT,
};
use super::{FieldKind, FieldMatch, FieldValue};

/// Round hours to two decimals, half away from zero.
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `hours + minutes/60 + seconds/3600`, rounded to two decimals.
pub fn hours_from_parts(hours: u32, minutes: u32, seconds: u32) -> Decimal {
    let total = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
    round_hours(Decimal::from(total) / Decimal::from(3600))
}

/// Hours between two timestamps, rounded. Negative spans yield `None`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Option<Decimal> {
    let seconds = (end - start).num_seconds();
    if seconds < 0 {
        return None;
    }
    Some(round_hours(Decimal::from(seconds) / Decimal::from(3600)))
}

fn parse_hms(hours: &str, minutes: &str, seconds: Option<&str>) -> Option<Decimal> {
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    let s: u32 = match seconds {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    (m < 60 && s < 60).then(|| hours_from_parts(h, m, s))
}

/// Duration from captured hour/minute/second text, or a rejection when a
/// component is out of range.
pub(crate) fn duration_value(
    raw: &str,
    hours: &str,
    minutes: &str,
    seconds: Option<&str>,
) -> FieldValue {
    match parse_hms(hours, minutes, seconds) {
        Some(hours) => FieldValue::Duration(hours),
        None => FieldValue::Rejected {
            field: FieldKind::Duration,
            raw: raw.to_string(),
        },
    }
}

fn hms_match(re: &Regex, line: &str) -> Option<FieldMatch> {
    let caps: Captures<'_> = re.captures(line)?;
    let raw = caps[0].to_string();
    let value = duration_value(
        &raw,
        &caps[1],
        &caps[2],
        caps.get(3).map(|m| m.as_str()),
    );
    Some(FieldMatch::single(value, raw))
}

/// `Elapsed Time: 04h:10m:00s`
pub fn elapsed_strict(line: &str) -> Option<FieldMatch> {
    hms_match(&ELAPSED_STRICT, line)
}

/// `Elapsad Tima 4h 10m 0s` and similar damage.
pub fn elapsed_fuzzy(line: &str) -> Option<FieldMatch> {
    hms_match(&ELAPSED_FUZZY, line)
}

/// Unlabeled `04h:10m:00s` or `4h 10m`.
pub fn compact(line: &str) -> Option<FieldMatch> {
    hms_match(&DURATION_COMPACT, line)
}

/// `4 Hours 10 Minutes`, `4 hrs, 10 mins`.
pub fn verbose(line: &str) -> Option<FieldMatch> {
    hms_match(&DURATION_VERBOSE, line)
}

/// `3.5 hours`, `8 hrs`.
pub fn decimal(line: &str) -> Option<FieldMatch> {
    let caps = DURATION_DECIMAL.captures(line)?;
    let raw = caps[0].to_string();
    let value = match caps[1].parse::<Decimal>() {
        Ok(hours) => FieldValue::Duration(round_hours(hours)),
        Err(_) => FieldValue::Rejected {
            field: FieldKind::Duration,
            raw: raw.clone(),
        },
    };
    Some(FieldMatch::single(value, raw))
}

/// `Total: 8:30`, `Hours 7:45`.
pub fn labeled_clock(line: &str) -> Option<FieldMatch> {
    hms_match(&DURATION_LABELED_CLOCK, line)
}

/// First duration token on a line in any of the unlabeled spellings.
pub fn first_duration(line: &str) -> Option<FieldMatch> {
    compact(line)
        .or_else(|| verbose(line))
        .or_else(|| labeled_clock(line))
        .or_else(|| decimal(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hours_of(m: Option<FieldMatch>) -> Option<Decimal> {
        match m?.fields.first()? {
            FieldValue::Duration(h) => Some(*h),
            _ => None,
        }
    }

    #[test]
    fn test_hours_from_parts() {
        assert_eq!(hours_from_parts(4, 10, 0), dec("4.17"));
        assert_eq!(hours_from_parts(22, 27, 0), dec("22.45"));
        assert_eq!(hours_from_parts(0, 0, 0), dec("0"));
        assert_eq!(hours_from_parts(7, 51, 0), dec("7.85"));
        // 0.125 rounds away from zero
        assert_eq!(hours_from_parts(0, 7, 30), dec("0.13"));
    }

    #[test]
    fn test_hours_between() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(9, 1, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 3)
            .unwrap()
            .and_hms_opt(7, 28, 0)
            .unwrap();
        assert_eq!(hours_between(start, end), Some(dec("22.45")));
        assert_eq!(hours_between(end, start), None);
        assert_eq!(hours_between(start, start), Some(dec("0")));
    }

    #[test]
    fn test_duration_fixtures() {
        let cases: &[(fn(&str) -> Option<FieldMatch>, &str, Option<&str>)] = &[
            (elapsed_strict, "Elapsed Time: 04h:10m:00s", Some("4.17")),
            (elapsed_strict, "Elapsed Time 07h51m00s", Some("7.85")),
            (elapsed_strict, "Elapsad Tima 4h 10m 0s", None),
            (elapsed_fuzzy, "Elapsad Tima 4h 10m 0s", Some("4.17")),
            (elapsed_fuzzy, "elapsed time: 08 h : 07 m : 00 s", Some("8.12")),
            (compact, "04h:10m:00s", Some("4.17")),
            (compact, "total 2h 30m", Some("2.5")),
            (compact, "Order Number: SO24-02365-21800", None),
            (verbose, "4 Hours 10 Minutes", Some("4.17")),
            (verbose, "3 hrs, 45 mins", Some("3.75")),
            (verbose, "4 Hours", None),
            (decimal, "Worked 3.5 hours", Some("3.5")),
            (decimal, "8 hrs", Some("8")),
            (decimal, "Room 12", None),
            (labeled_clock, "Total: 8:30", Some("8.5")),
            (labeled_clock, "8:30 AM", None),
        ];

        for (matcher, line, expected) in cases {
            assert_eq!(hours_of(matcher(line)), expected.map(dec), "line: {line}");
        }
    }

    #[test]
    fn test_out_of_range_minutes_rejected() {
        let m = verbose("4 Hours 75 Minutes").unwrap();
        assert_eq!(
            m.fields[0],
            FieldValue::Rejected {
                field: FieldKind::Duration,
                raw: "4 Hours 75 Minutes".to_string(),
            }
        );
    }

    #[test]
    fn test_first_duration_prefers_hours_and_minutes() {
        assert_eq!(hours_of(first_duration("4 Hours 10 Minutes")), Some(dec("4.17")));
        assert_eq!(hours_of(first_duration("8.5 hours")), Some(dec("8.5")));
        assert_eq!(hours_of(first_duration("no time here")), None);
    }
}
