//! Date, clock time and datetime range parsing.
//!
//! Both source documents print US-style `M/D/YYYY` dates with 12-hour clock
//! times. Seconds are optional and default to `:00`. The generic cascade
//! additionally accepts ISO dates and `Month D, YYYY`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Captures;

use super::duration::first_duration;
use super::patterns::{
    DATETIME_PARTS, DATE_ISO, DATE_LONG, DATE_US, RANGE_FLEX, RANGE_LOOSE, RANGE_STRICT,
    TIME_12H, TIME_24H,
};
use super::{range_field, FieldKind, FieldMatch, FieldValue};

/// Parse `M/D/YYYY`; `.` and `-` are accepted as separators.
pub fn parse_us_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split(['/', '.', '-']);
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `h:mm[:ss]` with an optional meridiem (`AM`, `p`, `P.M.`).
///
/// With a meridiem the hour must be 1-12; without one it is read as 24-hour.
pub fn parse_clock(time: &str, meridiem: Option<&str>) -> Option<NaiveTime> {
    let mut parts = time.trim().split([':', '.']);
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) => s.trim().parse().ok()?,
        None => 0,
    };

    let hour = match meridiem.and_then(|m| m.trim().chars().next()) {
        Some(c) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match c.to_ascii_uppercase() {
                'A' => hour % 12,
                'P' => hour % 12 + 12,
                _ => return None,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parse a full `M/D/YYYY h:mm[:ss] AM` timestamp, tolerating OCR noise
/// between the date and the time.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let caps = DATETIME_PARTS.captures(s)?;
    datetime_from_parts(&caps)
}

fn datetime_from_parts(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let time = match caps.get(6) {
        Some(sec) => format!("{}:{}:{}", &caps[4], &caps[5], sec.as_str()),
        None => format!("{}:{}", &caps[4], &caps[5]),
    };
    let meridiem = caps.get(7).map(|m| m.as_str());
    let time = parse_clock(&time, meridiem)?;

    Some(date.and_time(time))
}

/// Parse any of the supported date spellings.
pub fn parse_any_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(date) = parse_us_date(s) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    // "June 6, 2025", "Jun. 6 2025", "Sept 6, 2025"
    let cleaned = s.replace([',', '.'], " ").replace("Sept", "Sep");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&cleaned, "%B %d %Y")
        .or_else(|_| NaiveDate::parse_from_str(&cleaned, "%b %d %Y"))
        .ok()
}

/// Convert a range capture laid out as (date, time, meridiem) x 2.
fn range_from_captures(caps: &Captures<'_>) -> FieldMatch {
    let endpoint = |d: usize| -> Option<NaiveDateTime> {
        let date = parse_us_date(&caps[d])?;
        let time = parse_clock(&caps[d + 1], Some(&caps[d + 2]))?;
        Some(date.and_time(time))
    };

    let raw = caps[0].to_string();
    FieldMatch::single(range_field(endpoint(1), endpoint(4), &raw), raw)
}

/// `6/6/2025 11:23:00 AM - 6/6/2025 3:33:00 PM`, exact spacing and seconds.
pub fn range_strict(line: &str) -> Option<FieldMatch> {
    RANGE_STRICT.captures(line).map(|c| range_from_captures(&c))
}

/// Optional seconds, any meridiem case, dash or "to" between the halves.
pub fn range_flex(line: &str) -> Option<FieldMatch> {
    RANGE_FLEX.captures(line).map(|c| range_from_captures(&c))
}

/// OCR-damaged ranges: `.` for `:`, run-together date and time, stray separators.
pub fn range_loose(line: &str) -> Option<FieldMatch> {
    RANGE_LOOSE.captures(line).map(|c| range_from_captures(&c))
}

/// A date on its own, optionally followed by a start/end time pair and a
/// duration token on the same line. Used by the generic cascade.
pub fn date_line(line: &str) -> Option<FieldMatch> {
    let date_match = DATE_US
        .captures(line)
        .or_else(|| DATE_ISO.captures(line))
        .or_else(|| DATE_LONG.captures(line))?;

    let raw_date = date_match[1].to_string();
    let mut result = match parse_any_date(&raw_date) {
        Some(date) => FieldMatch::single(FieldValue::Date(date), raw_date),
        None => FieldMatch::single(
            FieldValue::Rejected {
                field: FieldKind::Date,
                raw: raw_date.clone(),
            },
            raw_date,
        ),
    };

    let mut times: Vec<(String, Option<NaiveTime>)> = TIME_12H
        .captures_iter(line)
        .map(|c| (c[0].to_string(), parse_clock(&c[1], Some(&c[2]))))
        .collect();
    if times.is_empty() {
        times = TIME_24H
            .captures_iter(line)
            .map(|c| (c[0].to_string(), parse_clock(&c[1], None)))
            .collect();
    }

    if times.len() >= 2 {
        let raw = format!("{} {}", times[0].0, times[1].0);
        match (times[0].1, times[1].1) {
            (Some(start), Some(end)) => result.push(FieldValue::TimePair { start, end }, raw),
            _ => result.push(
                FieldValue::Rejected {
                    field: FieldKind::TimePair,
                    raw: raw.clone(),
                },
                raw,
            ),
        }
    }

    if let Some(duration) = first_duration(line) {
        result.fields.extend(duration.fields);
        result.raw.extend(duration.raw);
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_clock_meridiem() {
        assert_eq!(parse_clock("11:23:00", Some("AM")), NaiveTime::from_hms_opt(11, 23, 0));
        assert_eq!(parse_clock("3:33", Some("pm")), NaiveTime::from_hms_opt(15, 33, 0));
        assert_eq!(parse_clock("12:05", Some("AM")), NaiveTime::from_hms_opt(0, 5, 0));
        assert_eq!(parse_clock("12:05", Some("PM")), NaiveTime::from_hms_opt(12, 5, 0));
        assert_eq!(parse_clock("13:05", Some("PM")), None);
        assert_eq!(parse_clock("17:45", None), NaiveTime::from_hms_opt(17, 45, 0));
        assert_eq!(parse_clock("7.28", Some("A")), NaiveTime::from_hms_opt(7, 28, 0));
    }

    #[test]
    fn test_parse_datetime() {
        assert_eq!(parse_datetime("6/6/2025 3:33:00 PM"), Some(dt(2025, 6, 6, 15, 33, 0)));
        assert_eq!(parse_datetime("6/6/2025  10:23 am"), Some(dt(2025, 6, 6, 10, 23, 0)));
        assert_eq!(parse_datetime("13/45/2025 3:33:00 PM"), None);
    }

    #[test]
    fn test_parse_any_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 6);
        assert_eq!(parse_any_date("6/6/2025"), expected);
        assert_eq!(parse_any_date("2025-06-06"), expected);
        assert_eq!(parse_any_date("June 6, 2025"), expected);
        assert_eq!(parse_any_date("Jun. 6 2025"), expected);
        assert_eq!(parse_any_date("2/30/2025"), None);
    }

    #[test]
    fn test_range_fixtures() {
        let cases: &[(fn(&str) -> Option<FieldMatch>, &str, Option<(NaiveDateTime, NaiveDateTime)>)] = &[
            (
                range_strict,
                "6/6/2025 11:23:00 AM - 6/6/2025 3:33:00 PM",
                Some((dt(2025, 6, 6, 11, 23, 0), dt(2025, 6, 6, 15, 33, 0))),
            ),
            (range_strict, "6/6/2025 11:23 AM - 6/6/2025 3:33 PM", None),
            (
                range_flex,
                "6/6/2025 11:23 am to 6/6/2025 3:33 pm",
                Some((dt(2025, 6, 6, 11, 23, 0), dt(2025, 6, 6, 15, 33, 0))),
            ),
            (
                range_flex,
                "6/2/2025 9:01:00 AM – 6/3/2025 7:28:00 AM",
                Some((dt(2025, 6, 2, 9, 1, 0), dt(2025, 6, 3, 7, 28, 0))),
            ),
            (
                range_loose,
                "6/6/2025 11.23.00 AM ~ 6-6-2025 3.33.00 P M",
                Some((dt(2025, 6, 6, 11, 23, 0), dt(2025, 6, 6, 15, 33, 0))),
            ),
            (range_loose, "Elapsed Time: 04h:10m:00s", None),
        ];

        for (matcher, line, expected) in cases {
            let got = matcher(line).and_then(|m| match m.fields.first() {
                Some(FieldValue::Range { start, end }) => Some((*start, *end)),
                _ => None,
            });
            assert_eq!(got, *expected, "line: {line}");
        }
    }

    #[test]
    fn test_range_with_impossible_date_is_rejected() {
        let m = range_flex("13/45/2025 11:23 AM - 6/6/2025 3:33 PM").unwrap();
        assert!(matches!(
            m.fields[0],
            FieldValue::Rejected { field: FieldKind::Range, .. }
        ));
    }

    #[test]
    fn test_date_line_with_times_and_hours() {
        let m = date_line("Mon 6/9/2025  8:00 AM  4:30 PM  8.5 hours").unwrap();
        assert_eq!(m.fields[0], FieldValue::Date(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()));
        assert_eq!(
            m.fields[1],
            FieldValue::TimePair {
                start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            }
        );
        assert_eq!(m.fields[2].kind(), FieldKind::Duration);
    }

    #[test]
    fn test_date_line_24_hour_times() {
        let m = date_line("2025-06-09 07:30 15:45").unwrap();
        assert_eq!(
            m.fields[1],
            FieldValue::TimePair {
                start: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
                end: NaiveTime::from_hms_opt(15, 45, 0).unwrap(),
            }
        );
    }
}
