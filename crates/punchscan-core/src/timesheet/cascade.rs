//! Per-format matcher sets.
//!
//! A [`MatcherSet`] is an ordered list of field cascades. For each line the
//! cascades are tried in order and, inside a cascade, the matchers from
//! strictest to loosest; the first matcher that accepts the line claims it.
//! The assembler logic is shared by all formats; only the set differs.

use crate::models::format::DocumentFormat;

use super::rules::{datetime, duration, identifier, labor_row, name};
use super::rules::{FieldKind, FieldMatch, Matcher};

/// When a field cascade is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// Only while the current record has no employee name.
    NameUnknown,
}

/// Matchers for one field, strictest first.
#[derive(Debug)]
pub struct FieldCascade {
    pub label: &'static str,
    pub matchers: &'static [Matcher],
    pub guard: Guard,
}

/// What may open a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLead {
    /// Only an identifier opens a record; earlier fields are dropped.
    Identifier,
    /// Any field opens a record.
    Any,
}

/// The cascades and record rules for one document format.
#[derive(Debug)]
pub struct MatcherSet {
    pub format: DocumentFormat,
    pub cascades: &'static [FieldCascade],
    /// Field kinds that close the current record when it already holds one.
    pub boundaries: &'static [FieldKind],
    pub lead: RecordLead,
    /// Retry an unclaimed line joined with its successor when it holds an
    /// order number (rows wrapped by OCR).
    pub join_wrapped: bool,
    /// Records without an identifier get an `OTHER-n` category instead of
    /// being discarded.
    pub placeholder_ids: bool,
}

/// Output of the first matcher that accepted a line.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMatch {
    pub matcher: &'static str,
    /// Zero-based index of the (first) line matched.
    pub line: usize,
    pub found: FieldMatch,
}

impl MatcherSet {
    /// The set for a document format.
    pub fn for_format(format: DocumentFormat) -> &'static MatcherSet {
        match format {
            DocumentFormat::PunchClock => &PUNCH_CLOCK,
            DocumentFormat::LaborCollection => &LABOR_COLLECTION,
            DocumentFormat::Generic => &GENERIC,
        }
    }

    /// Run the cascades over one line.
    pub fn match_line(&self, text: &str, line: usize, name_known: bool) -> Option<CandidateMatch> {
        for cascade in self.cascades {
            if cascade.guard == Guard::NameUnknown && name_known {
                continue;
            }
            for matcher in cascade.matchers {
                if let Some(found) = matcher.try_match(text) {
                    return Some(CandidateMatch {
                        matcher: matcher.name,
                        line,
                        found,
                    });
                }
            }
        }
        None
    }

    pub fn is_boundary(&self, kind: FieldKind) -> bool {
        self.boundaries.contains(&kind)
    }
}

const NAME_LABELED: FieldCascade = FieldCascade {
    label: "name",
    matchers: &[Matcher { name: "name_labeled", apply: name::labeled }],
    guard: Guard::Always,
};

const NAME_BARE: FieldCascade = FieldCascade {
    label: "name_bare",
    matchers: &[Matcher { name: "name_bare", apply: name::bare }],
    guard: Guard::NameUnknown,
};

const RANGE: FieldCascade = FieldCascade {
    label: "range",
    matchers: &[
        Matcher { name: "range_strict", apply: datetime::range_strict },
        Matcher { name: "range_flex", apply: datetime::range_flex },
        Matcher { name: "range_loose", apply: datetime::range_loose },
    ],
    guard: Guard::Always,
};

pub static PUNCH_CLOCK: MatcherSet = MatcherSet {
    format: DocumentFormat::PunchClock,
    cascades: &[
        FieldCascade {
            label: "order",
            matchers: &[
                Matcher { name: "order_labeled_strict", apply: identifier::labeled_strict },
                Matcher { name: "order_labeled_fuzzy", apply: identifier::labeled_fuzzy },
                Matcher { name: "order_bare", apply: identifier::bare_token },
            ],
            guard: Guard::Always,
        },
        FieldCascade {
            label: "elapsed",
            matchers: &[
                Matcher { name: "elapsed_strict", apply: duration::elapsed_strict },
                Matcher { name: "elapsed_fuzzy", apply: duration::elapsed_fuzzy },
                Matcher { name: "duration_compact", apply: duration::compact },
                Matcher { name: "duration_verbose", apply: duration::verbose },
            ],
            guard: Guard::Always,
        },
        RANGE,
        NAME_LABELED,
        NAME_BARE,
    ],
    boundaries: &[FieldKind::Identifier],
    lead: RecordLead::Identifier,
    join_wrapped: false,
    placeholder_ids: false,
};

pub static LABOR_COLLECTION: MatcherSet = MatcherSet {
    format: DocumentFormat::LaborCollection,
    cascades: &[FieldCascade {
        label: "row",
        matchers: &[
            Matcher { name: "row_strict", apply: labor_row::strict },
            Matcher { name: "row_underscore", apply: labor_row::underscore },
            Matcher { name: "row_flex", apply: labor_row::flex },
            Matcher { name: "row_tab", apply: labor_row::tab },
            Matcher { name: "row_loose", apply: labor_row::loose },
            Matcher { name: "row_time_keyword", apply: labor_row::time_keyword },
            Matcher { name: "row_unlabeled", apply: labor_row::unlabeled },
        ],
        guard: Guard::Always,
    }],
    boundaries: &[FieldKind::Identifier],
    lead: RecordLead::Identifier,
    join_wrapped: true,
    placeholder_ids: false,
};

pub static GENERIC: MatcherSet = MatcherSet {
    format: DocumentFormat::Generic,
    cascades: &[
        FieldCascade {
            label: "identifier",
            matchers: &[
                Matcher { name: "job_labeled", apply: identifier::job_labeled },
                Matcher { name: "category_labeled", apply: identifier::category_labeled },
            ],
            guard: Guard::Always,
        },
        RANGE,
        FieldCascade {
            label: "date",
            matchers: &[Matcher { name: "date_line", apply: datetime::date_line }],
            guard: Guard::Always,
        },
        FieldCascade {
            label: "duration",
            matchers: &[
                Matcher { name: "duration_compact", apply: duration::compact },
                Matcher { name: "duration_verbose", apply: duration::verbose },
                Matcher { name: "duration_labeled_clock", apply: duration::labeled_clock },
                Matcher { name: "duration_decimal", apply: duration::decimal },
            ],
            guard: Guard::Always,
        },
        NAME_LABELED,
        NAME_BARE,
    ],
    boundaries: &[FieldKind::Identifier, FieldKind::Range, FieldKind::Date],
    lead: RecordLead::Any,
    join_wrapped: false,
    placeholder_ids: true,
};
