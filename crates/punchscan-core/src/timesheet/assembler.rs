//! Folds line matches into time entries.
//!
//! The assembler keeps one open record. A boundary field (an identifier,
//! or for date-led formats a second date) closes it and opens the next; every
//! other field fills the open record only where it is still empty. Closed
//! records are validated and either turned into a [`TimeEntry`] or reported
//! as a [`DiscardedRecord`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::entry::{Identifier, SourceFormat, TimeEntry};

use super::cascade::{CandidateMatch, MatcherSet, RecordLead};
use super::rules::duration::hours_between;
use super::rules::identifier::is_service_order;
use super::rules::{FieldKind, FieldValue};

/// Why a closed record did not become an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    MissingIdentifier,
    MissingTime,
    EndBeforeStart,
}

/// A record that was dropped at close time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedRecord {
    /// Zero-based line that opened the record.
    pub line: usize,
    pub reason: DiscardReason,
}

#[derive(Debug, Default)]
struct Draft {
    opened_at: usize,
    identifier: Option<Identifier>,
    labor_type: Option<String>,
    duration: Option<Decimal>,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
    date: Option<NaiveDate>,
    time_pair: Option<(NaiveTime, NaiveTime)>,
    name: Option<String>,
}

impl Draft {
    fn new(opened_at: usize) -> Self {
        Self {
            opened_at,
            ..Default::default()
        }
    }

    fn has(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Identifier => self.identifier.is_some(),
            FieldKind::LaborType => self.labor_type.is_some(),
            FieldKind::Duration => self.duration.is_some(),
            FieldKind::Range => self.range.is_some(),
            FieldKind::Date => self.date.is_some(),
            FieldKind::TimePair => self.time_pair.is_some(),
            FieldKind::Name => self.name.is_some(),
        }
    }

    /// Fill an empty slot; values for slots already set are ignored.
    fn merge(&mut self, value: FieldValue) {
        match value {
            FieldValue::Identifier(id) => {
                self.identifier.get_or_insert(id);
            }
            FieldValue::LaborType(labor) => {
                self.labor_type.get_or_insert(labor);
            }
            FieldValue::Duration(hours) => {
                self.duration.get_or_insert(hours);
            }
            FieldValue::Range { start, end } => {
                // A range dates its record, so a later dated line opens the next one.
                self.date.get_or_insert(start.date());
                self.range.get_or_insert((start, end));
            }
            FieldValue::Date(date) => {
                self.date.get_or_insert(date);
            }
            FieldValue::TimePair { start, end } => {
                self.time_pair.get_or_insert((start, end));
            }
            FieldValue::Name(name) => {
                self.name.get_or_insert(name);
            }
            FieldValue::Rejected { .. } => {}
        }
    }

    /// Start and end, from a full range or from a date plus a time pair.
    fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.range.or_else(|| {
            let date = self.date?;
            let (start, end) = self.time_pair?;
            Some((date.and_time(start), date.and_time(end)))
        })
    }
}

/// Entries and diagnostics produced by one assembly pass.
#[derive(Debug, Default)]
pub struct Assembled {
    pub entries: Vec<TimeEntry>,
    pub discarded: Vec<DiscardedRecord>,
    pub warnings: Vec<String>,
}

/// Line-by-line record builder for one matcher set.
pub struct Assembler<'a> {
    set: &'a MatcherSet,
    source: SourceFormat,
    unknown_employee: &'a str,
    current: Option<Draft>,
    next_placeholder: usize,
    out: Assembled,
}

impl<'a> Assembler<'a> {
    pub fn new(set: &'a MatcherSet, source: SourceFormat, unknown_employee: &'a str) -> Self {
        Self {
            set,
            source,
            unknown_employee,
            current: None,
            next_placeholder: 1,
            out: Assembled::default(),
        }
    }

    /// Whether the open record already has an employee name.
    pub fn name_known(&self) -> bool {
        self.current.as_ref().is_some_and(|d| d.name.is_some())
    }

    /// Fold one line match into the open record.
    pub fn accept(&mut self, candidate: CandidateMatch) {
        let CandidateMatch {
            matcher,
            line,
            found,
        } = candidate;

        for value in found.fields {
            if let FieldValue::Rejected { field, raw } = &value {
                debug!("Line {}: {} rejected {:?} {:?}", line, matcher, field, raw);
                self.out.warnings.push(format!(
                    "line {}: could not read {:?} from \"{}\"",
                    line + 1,
                    field,
                    raw
                ));
                continue;
            }

            let kind = value.kind();
            if self.set.is_boundary(kind) {
                let closes = self.current.as_ref().is_some_and(|d| d.has(kind));
                if closes {
                    self.close();
                }
                if self.current.is_none() {
                    self.current = Some(Draft::new(line));
                }
            } else if self.current.is_none() {
                if self.set.lead == RecordLead::Identifier {
                    debug!("Line {}: {:?} before any record, skipped", line, kind);
                    continue;
                }
                self.current = Some(Draft::new(line));
            }

            if let Some(draft) = self.current.as_mut() {
                draft.merge(value);
            }
        }
    }

    /// Close the last record and return everything assembled.
    pub fn finish(mut self) -> Assembled {
        self.close();
        self.out
    }

    fn discard(&mut self, line: usize, reason: DiscardReason) {
        debug!("Discarding record opened at line {}: {:?}", line, reason);
        self.out.discarded.push(DiscardedRecord { line, reason });
    }

    fn close(&mut self) {
        let Some(draft) = self.current.take() else {
            return;
        };
        let line = draft.opened_at;

        if draft.identifier.is_none() && !self.set.placeholder_ids {
            self.discard(line, DiscardReason::MissingIdentifier);
            return;
        }

        let span = draft.span();
        if let Some((start, end)) = span {
            if end < start {
                self.discard(line, DiscardReason::EndBeforeStart);
                return;
            }
        }

        let duration = match (draft.duration, span) {
            (Some(hours), _) => hours,
            (None, Some((start, end))) => match hours_between(start, end) {
                Some(hours) => hours,
                None => {
                    self.discard(line, DiscardReason::EndBeforeStart);
                    return;
                }
            },
            (None, None) => {
                self.discard(line, DiscardReason::MissingTime);
                return;
            }
        };

        let identifier = match draft.identifier {
            Some(id) => id,
            None => {
                let id = Identifier::Category(format!("OTHER-{}", self.next_placeholder));
                self.next_placeholder += 1;
                id
            }
        };

        if let Identifier::ServiceOrder(id) = &identifier {
            if !self.set.placeholder_ids && !is_service_order(id) {
                self.out.warnings.push(format!(
                    "line {}: order number \"{}\" is incomplete",
                    line + 1,
                    id
                ));
            }
        }

        let work_date = span.map(|(start, _)| start.date()).or(draft.date);

        self.out.entries.push(TimeEntry {
            kind: identifier.kind(),
            identifier,
            employee_name: draft
                .name
                .unwrap_or_else(|| self.unknown_employee.to_string()),
            start: span.map(|(start, _)| start),
            end: span.map(|(_, end)| end),
            work_date,
            labor_type: draft.labor_type,
            duration_hours: duration,
            source_format: self.source,
            demo: false,
            source_line: Some(line),
        });
    }
}
