//! Common regex patterns for time entry extraction.
//!
//! Patterns are grouped by field. Within a group they are listed from the
//! strictest to the most permissive; the matcher functions in the sibling
//! modules decide the order they are tried in.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Service order identifiers
    pub static ref ORDER_LABELED_STRICT: Regex = Regex::new(
        r"Order\s+Number:?\s+([$S][O0][\dO]{2}-[\dO]{5}-[\dO]{5})"
    ).unwrap();

    pub static ref ORDER_LABELED_FUZZY: Regex = Regex::new(
        r"(?i)(?:Order|Qrder|0rder)[\s\-]*(?:Number|Humber|Numher|Num|Hum)?[\s:#]*([A-Z0-9$]{1,4}[\-.]?[0-9O]{1,6}[\-.]?[0-9O]{1,6})\b"
    ).unwrap();

    pub static ref ORDER_BARE: Regex = Regex::new(
        r"^\s*([$S][O0][\dO]{2}[-.\s]?[\dO]{5}[-.\s]?[\dO]{5})\s*$"
    ).unwrap();

    pub static ref ORDER_SHAPE: Regex = Regex::new(
        r"^[$S][O0]([0-9O]{2})[-.\s]*([0-9O]{5})[-.\s]*([0-9O]{5})$"
    ).unwrap();

    pub static ref ORDER_ANYWHERE: Regex = Regex::new(
        r"(?i)([$S][O0$][\dO]{2}[-.\s]*[\dO]{5}[-.\s]*[\dO]{5})"
    ).unwrap();

    // Generic identifiers
    pub static ref JOB_LABELED: Regex = Regex::new(
        r"(?i)\b(?:job|order|code)\b(?:\s*(?:number|num|no\.?))?[\s:#]*([A-Za-z0-9$]{2,}[-.A-Za-z0-9]*\d)"
    ).unwrap();

    pub static ref CATEGORY_LABELED: Regex = Regex::new(
        r"(?i)\b(?:category|task|activity|labor\s+type)\s*[:#\-]\s*([A-Za-z][A-Za-z0-9 &/\-]{1,40}?)\s*$"
    ).unwrap();

    // Elapsed durations
    pub static ref ELAPSED_STRICT: Regex = Regex::new(
        r"Elapsed\s+Time:?\s+(\d{2})h:?(\d{2})m:?(\d{2})s"
    ).unwrap();

    pub static ref ELAPSED_FUZZY: Regex = Regex::new(
        r"(?i)(?:Elapsed|Elapsad|Ela\s?psed)[\s\-]*(?:Time|Tima)?[\s:]*(\d{1,2})[\s:]*h[\s:]*(\d{1,2})[\s:]*m[\s:]*(\d{1,2})[\s:]*s"
    ).unwrap();

    pub static ref DURATION_COMPACT: Regex = Regex::new(
        r"(?i)\b(\d{1,3})\s*h\s*:?\s*(\d{1,2})\s*m(?:\s*:?\s*(\d{1,2})\s*s)?\b"
    ).unwrap();

    pub static ref DURATION_VERBOSE: Regex = Regex::new(
        r"(?i)\b(\d{1,3})\s*(?:hours?|hrs?)\.?[\s,]*(?:and\s+)?(\d{1,2})\s*(?:minutes?|mins?)\b"
    ).unwrap();

    pub static ref DURATION_DECIMAL: Regex = Regex::new(
        r"(?i)\b(\d{1,2}(?:\.\d{1,2})?)\s*(?:hours?|hrs?|h)\b"
    ).unwrap();

    pub static ref DURATION_LABELED_CLOCK: Regex = Regex::new(
        r"(?i)\b(?:total|duration|elapsed|hours)\b[\s:=]*(\d{1,3}):(\d{2})\b"
    ).unwrap();

    // Datetime ranges: groups are (date, time, meridiem) twice
    pub static ref RANGE_STRICT: Regex = Regex::new(
        r"(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2}:\d{2})\s+([AP]M)\s+-\s+(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2}:\d{2})\s+([AP]M)"
    ).unwrap();

    pub static ref RANGE_FLEX: Regex = Regex::new(
        r"(?i)(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2}(?::\d{2})?)\s*([AP])\.?M\.?\s*(?:-|–|—|to)\s*(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2}(?::\d{2})?)\s*([AP])\.?M\.?"
    ).unwrap();

    pub static ref RANGE_LOOSE: Regex = Regex::new(
        r"(?i)(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4})[\s,]*(\d{1,2}[:.]\d{2}(?:[:.]\d{2})?)\s*([AP])\.?\s?M\.?[\s\-–—_~]*(?:to)?[\s\-–—_~]*(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4})[\s,]*(\d{1,2}[:.]\d{2}(?:[:.]\d{2})?)\s*([AP])\.?\s?M\.?"
    ).unwrap();

    // Loose datetime pieces, used when re-parsing captured row columns
    pub static ref DATETIME_PARTS: Regex = Regex::new(
        r"(?i)(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})\D*?(\d{1,2})[:.](\d{2})(?:[:.](\d{2}))?\s*(?:([AP])\.?\s?M\.?)?"
    ).unwrap();

    // Dates and times on their own
    pub static ref DATE_US: Regex = Regex::new(
        r"\b(\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4}-\d{1,2}-\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_LONG: Regex = Regex::new(
        r"\b((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4})\b"
    ).unwrap();

    pub static ref TIME_12H: Regex = Regex::new(
        r"(?i)\b(\d{1,2}:\d{2}(?::\d{2})?)\s*([AP])\.?M\b"
    ).unwrap();

    pub static ref TIME_24H: Regex = Regex::new(
        r"\b(\d{1,2}:\d{2})\b"
    ).unwrap();

    // Person names
    pub static ref NAME_LABELED: Regex = Regex::new(
        r"(?i:employee|name|user|technician|tech)\s*(?i:name)?\s*[:\-]\s*([A-Z][a-zA-Z'\-]+(?:\s+[A-Z][a-zA-Z'\-]+)+)"
    ).unwrap();

    pub static ref NAME_BARE: Regex = Regex::new(
        r"^([A-Z][a-z]+\s+[A-Z][a-z]+)$"
    ).unwrap();

    pub static ref SALUTATION_DEAR: Regex = Regex::new(
        r"(?i:dear)\s+([A-Za-z][A-Za-z.]*\s+[A-Za-z][A-Za-z.]*)"
    ).unwrap();

    pub static ref SALUTATION_TO: Regex = Regex::new(
        r"To:\s*([A-Za-z]+\s+[A-Za-z]+)"
    ).unwrap();

    // Labor collection rows: (order, [labor type], start, end, hours, minutes)
    pub static ref ROW_STRICT: Regex = Regex::new(
        r"([$S][O0$][\dO]{2}-[\dO]{5}-[\dO]{5})\s+([A-Za-z][\w ]*?)\s+(\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}:\d{2}\s+[AP]M)\s+(\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}:\d{2}\s+[AP]M)\s+(\d+)\s+Hours\s+(\d+)\s+Minutes"
    ).unwrap();

    pub static ref ROW_UNDERSCORE: Regex = Regex::new(
        r"([$S][O0$][\dO]{2}-[\dO]{5}-[\dO]{5})\s+([A-Za-z][\w ]*?)\s+(\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}:\d{2}\s+[AP]M)\s+(\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}:\d{2}\s+[AP]M)_?\s*(\d+)\s*_?\s*Hours\s+(\d+)\s+Minutes"
    ).unwrap();

    pub static ref ROW_FLEX: Regex = Regex::new(
        r"([$S][O0$][\dO]{2}.?[\dO]{5}.?[\dO]{5})\s+([A-Za-z][\w ]*?)\s+(\d{1,2}/\d{1,2}/\d{4}.+?(?:AM|PM))\s+(\d{1,2}/\d{1,2}/\d{4}.+?(?:AM|PM))\s+(\d+).?Hours.?(\d+).?Minutes"
    ).unwrap();

    pub static ref ROW_TAB: Regex = Regex::new(
        r"([$S][O0$][\dO]{2}[-.][\dO]{5}[-.][\dO]{5})\t+([^\t]+)\t+(\d{1,2}/\d{1,2}/\d{4}[^\t]+)\t+(\d{1,2}/\d{1,2}/\d{4}[^\t]+)\t+(\d+)\D*(\d+)"
    ).unwrap();

    pub static ref ROW_LOOSE: Regex = Regex::new(
        r"([$S][O0$]\S+)\s+([A-Za-z][\w ]*?)\s+(\d{1,2}/\d{1,2}/\d{4}.+?(?:AM|PM))\s+(\d{1,2}/\d{1,2}/\d{4}.+?(?:AM|PM))\s+(\d+)\s+H\w+\s+(\d+)\s+M\w+"
    ).unwrap();

    pub static ref ROW_TIME_KEYWORD: Regex = Regex::new(
        r"([SO$][O0$][\dO]{2}[\-.][\dO]{5}[\-.][\dO]{5})\s+([\w ]*Time[\w ]*?)\s+(\d{1,2}/\d{1,2}/\d{4}[\s\d:APM]+?)\s+(\d{1,2}/\d{1,2}/\d{4}[\s\d:APM]+?)\s+(\d+)\D+?(\d+)"
    ).unwrap();

    pub static ref ROW_UNLABELED: Regex = Regex::new(
        r"([$S][O0$][\dO]{2}[\-.][\dO]{5}[\-.][\dO]{5}).*?(\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}(?::\d{2})?\s*[AP]M).*?(\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}(?::\d{2})?\s*[AP]M).*?(\d+)\s+[Hh]ours?.*?(\d+)\s+[Mm]inutes"
    ).unwrap();

    // Table fallback tokens
    pub static ref TABLE_TIME: Regex = Regex::new(
        r"(\d{1,2}:\d{2}(?::\d{2})?\s*[APap][Mm])"
    ).unwrap();

    pub static ref TABLE_HOURS: Regex = Regex::new(
        r"(?i)(\d+)\s*hours?\s*(\d+)\s*minutes?"
    ).unwrap();

    // Document markers
    pub static ref PUNCH_CLOCK_MARKER: Regex = Regex::new(
        r"(?i)P[uv]nch[\s\-]*C[l1I]ocks?"
    ).unwrap();

    pub static ref HEADER_ORDER: Regex = Regex::new(r"(?i)[O0Q]r[dc]er").unwrap();
    pub static ref HEADER_TYPE: Regex = Regex::new(r"(?i)T[yv]p[eo]").unwrap();
    pub static ref HEADER_START: Regex = Regex::new(r"(?i)St[a@]r[t+]").unwrap();
    pub static ref HEADER_END: Regex = Regex::new(r"(?i)\b[EF][nm]d\b").unwrap();
    pub static ref HEADER_HOURS: Regex = Regex::new(r"(?i)H[o0][uv]rs?").unwrap();

    pub static ref TOTAL_HOURS: Regex = Regex::new(r"(?i)total\s+hours").unwrap();

    // Normalizer
    pub static ref TOKEN: Regex = Regex::new(r"\S+").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_strict_matches_report_row() {
        let line = "SO24-02365-21800 RegularTime 6/6/2025 10:23:00 AM 6/6/2025 2:33:00 PM 4 Hours 10 Minutes";
        let caps = ROW_STRICT.captures(line).unwrap();
        assert_eq!(&caps[1], "SO24-02365-21800");
        assert_eq!(&caps[2], "RegularTime");
        assert_eq!(&caps[3], "6/6/2025 10:23:00 AM");
        assert_eq!(&caps[4], "6/6/2025 2:33:00 PM");
        assert_eq!(&caps[5], "4");
        assert_eq!(&caps[6], "10");
    }

    #[test]
    fn test_header_keywords_tolerate_ocr() {
        let line = "0rder Humber  Labor Typo  Start Time  End Time  Hovrs";
        assert!(HEADER_ORDER.is_match(line));
        assert!(HEADER_TYPE.is_match(line));
        assert!(HEADER_START.is_match(line));
        assert!(HEADER_END.is_match(line));
        assert!(HEADER_HOURS.is_match(line));
    }
}
