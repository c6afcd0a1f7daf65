//! Text-level time entry parser.

use std::borrow::Cow;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ExtractionError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::entry::{SourceFormat, TimeEntry};
use crate::models::format::{DocumentFormat, FormatHint};

use super::assembler::{Assembled, Assembler, DiscardedRecord};
use super::cascade::{MatcherSet, GENERIC, LABOR_COLLECTION, PUNCH_CLOCK};
use super::classifier::{classify, find_labor_header};
use super::normalizer::normalize_text;
use super::rules::name::salutation;
use super::rules::patterns::{ORDER_ANYWHERE, TOTAL_HOURS};
use super::table;

/// Result of parsing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Entries in document order.
    pub entries: Vec<TimeEntry>,
    /// Format the document was classified as (or forced to).
    pub format: DocumentFormat,
    /// Cascades and fallbacks that ran, in order.
    pub stages: Vec<SourceFormat>,
    /// Fields that matched but could not be read.
    pub warnings: Vec<String>,
    /// Records dropped as incomplete or inconsistent.
    pub discarded: Vec<DiscardedRecord>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ParseReport {
    fn new(format: DocumentFormat) -> Self {
        Self {
            entries: Vec::new(),
            format,
            stages: Vec::new(),
            warnings: Vec::new(),
            discarded: Vec::new(),
            processing_time_ms: 0,
        }
    }

    fn absorb(&mut self, stage: SourceFormat, assembled: Assembled) {
        self.stages.push(stage);
        self.entries.extend(assembled.entries);
        self.warnings.extend(assembled.warnings);
        self.discarded.extend(assembled.discarded);
    }

    /// Whether a fallback stage produced the entries.
    pub fn used_fallback(&self) -> bool {
        self.stages.len() > 1
    }
}

// Instant::now panics on wasm32-unknown-unknown
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

/// Which lines a cascade pass looks at.
struct Scan<'t> {
    lines: Vec<&'t str>,
    from: usize,
    skip_totals: bool,
}

/// Parser from OCR text to time entries.
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct TimesheetParser {
    config: ExtractionConfig,
}

impl TimesheetParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given settings.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse with the configured default hint.
    pub fn parse_auto(&self, text: &str) -> Result<ParseReport> {
        self.parse(text, self.config.default_hint)
    }

    /// Parse OCR text into time entries.
    ///
    /// An empty entry list is a valid result unless strict mode is on.
    pub fn parse(&self, text: &str, hint: FormatHint) -> Result<ParseReport> {
        let started = start_timer();

        let text: Cow<'_, str> = if self.config.normalize {
            Cow::Owned(normalize_text(text))
        } else {
            Cow::Borrowed(text)
        };

        let format = match hint.forced() {
            Some(format) => {
                debug!("Format forced by hint: {}", format);
                format
            }
            None => {
                let format = classify(&text);
                debug!("Classified document as {}", format);
                format
            }
        };

        let mut report = ParseReport::new(format);
        match format {
            DocumentFormat::PunchClock => self.parse_punch_clock(&text, &mut report),
            DocumentFormat::LaborCollection => self.parse_labor_collection(&text, &mut report),
            DocumentFormat::Generic => {
                let assembled = self.run(&GENERIC, SourceFormat::Generic, whole(&text), None);
                report.absorb(SourceFormat::Generic, assembled);
            }
        }

        report.processing_time_ms = started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0);
        info!(
            "Parsed {} entries as {} ({} discarded) in {}ms",
            report.entries.len(),
            report.format,
            report.discarded.len(),
            report.processing_time_ms
        );

        if self.config.strict && report.entries.is_empty() {
            return Err(ExtractionError::NoEntries {
                format: format.to_string(),
            }
            .into());
        }

        Ok(report)
    }

    fn parse_punch_clock(&self, text: &str, report: &mut ParseReport) {
        let assembled = self.run(&PUNCH_CLOCK, SourceFormat::PunchClocks, whole(text), None);
        report.absorb(SourceFormat::PunchClocks, assembled);

        if report.entries.is_empty() {
            debug!("Punch clock cascade found nothing, trying generic cascade");
            let assembled = self.run(&GENERIC, SourceFormat::GenericFallback, whole(text), None);
            report.absorb(SourceFormat::GenericFallback, assembled);
        }
    }

    fn parse_labor_collection(&self, text: &str, report: &mut ParseReport) {
        let employee = salutation(text, self.config.salutation_scan_lines)
            .unwrap_or_else(|| self.config.report_employee.clone());
        debug!("Labor collection report for {}", employee);

        let lines: Vec<&str> = text.lines().collect();
        let from = match find_labor_header(&lines) {
            Some(header_end) => header_end + 1,
            None => {
                report
                    .warnings
                    .push("no labor collection header found, scanning all lines".to_string());
                0
            }
        };

        let scan = Scan {
            lines,
            from,
            skip_totals: true,
        };
        let assembled = self.run(
            &LABOR_COLLECTION,
            SourceFormat::LaborCollection,
            scan,
            Some(&employee),
        );
        report.absorb(SourceFormat::LaborCollection, assembled);

        if report.entries.is_empty() {
            debug!("Row cascade found nothing, trying table fallback");
            report.absorb(
                SourceFormat::LaborCollectionTable,
                table::extract_rows(text, &employee),
            );
        }
    }

    /// One cascade pass over the selected lines.
    fn run(
        &self,
        set: &MatcherSet,
        source: SourceFormat,
        scan: Scan<'_>,
        default_name: Option<&str>,
    ) -> Assembled {
        let default_name = default_name.unwrap_or(&self.config.unknown_employee);
        let mut assembler = Assembler::new(set, source, default_name);
        let join = set.join_wrapped && self.config.join_wrapped_rows;
        let lines = &scan.lines;

        let mut i = scan.from;
        while i < lines.len() {
            let line = lines[i];
            if line.trim().is_empty() || (scan.skip_totals && TOTAL_HOURS.is_match(line)) {
                i += 1;
                continue;
            }

            if let Some(candidate) = set.match_line(line, i, assembler.name_known()) {
                debug!("Line {} matched by {}", i, candidate.matcher);
                assembler.accept(candidate);
                i += 1;
                continue;
            }

            if join && ORDER_ANYWHERE.is_match(line) {
                if let Some(next) = lines.get(i + 1) {
                    let joined = format!("{} {}", line.trim_end(), next.trim_start());
                    if let Some(candidate) = set.match_line(&joined, i, assembler.name_known()) {
                        debug!("Lines {}-{} matched by {} after joining", i, i + 1, candidate.matcher);
                        assembler.accept(candidate);
                        i += 2;
                        continue;
                    }
                }
            }

            i += 1;
        }

        assembler.finish()
    }
}

fn whole(text: &str) -> Scan<'_> {
    Scan {
        lines: text.lines().collect(),
        from: 0,
        skip_totals: false,
    }
}
