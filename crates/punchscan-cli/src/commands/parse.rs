//! Parse command - extract time entries from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, info};

use punchscan_core::{ExtractionOutcome, TimeEntry};

use super::{build_extractor, extract_path, load_config, resolve_hint, InputKind};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (.txt transcript or an image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Format hint: auto, punch_clocks, labor_collection or generic
    #[arg(long)]
    hint: Option<String>,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Fail instead of returning an empty result
    #[arg(long)]
    strict: bool,

    /// Return a tagged demo entry when nothing could be extracted
    #[arg(long)]
    demo: bool,

    /// Show format, fallbacks, warnings and discarded records
    #[arg(long)]
    show_report: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }
    config.extraction.strict |= args.strict;
    config.extraction.demo_fallback |= args.demo;
    let hint = resolve_hint(args.hint.as_deref(), &config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let Some(kind) = InputKind::of(&args.input) else {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    };

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(match kind {
        InputKind::Image => "Running OCR...",
        InputKind::Text => "Parsing text...",
    });

    let extractor = build_extractor(&config, kind == InputKind::Image);
    let outcome = extract_path(&args.input, &extractor, hint)?;

    pb.finish_and_clear();

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    match &outcome {
        ExtractionOutcome::CannotExtract { reason } => {
            eprintln!("{} Cannot extract: {}", style("⚠").yellow(), reason);
        }
        ExtractionOutcome::Demo { reason, .. } => {
            eprintln!("{} Demo entry returned ({})", style("⚠").yellow(), reason);
        }
        ExtractionOutcome::Parsed(report) if args.show_report => {
            eprintln!();
            eprintln!("{} Format: {}", style("ℹ").blue(), report.format);
            let stages: Vec<&str> = report.stages.iter().map(|s| s.as_str()).collect();
            eprintln!("{} Stages: {}", style("ℹ").blue(), stages.join(" -> "));
            eprintln!(
                "{} {} entries, {} discarded, {}ms",
                style("ℹ").blue(),
                report.entries.len(),
                report.discarded.len(),
                report.processing_time_ms
            );
            for warning in &report.warnings {
                eprintln!("  {} {}", style("-").yellow(), warning);
            }
            for discarded in &report.discarded {
                eprintln!(
                    "  {} line {}: {:?}",
                    style("-").red(),
                    discarded.line + 1,
                    discarded.reason
                );
            }
        }
        ExtractionOutcome::Parsed(_) => {}
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_outcome(outcome: &ExtractionOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => format_csv(outcome.entries()),
        OutputFormat::Text => Ok(format_text(outcome.entries())),
    }
}

fn format_csv(entries: &[TimeEntry]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "employee_name",
        "identifier",
        "kind",
        "date",
        "start",
        "end",
        "duration_hours",
        "labor_type",
        "source_format",
        "demo",
    ])?;

    for entry in entries {
        wtr.write_record([
            entry.employee_name.as_str(),
            entry.identifier.as_str(),
            entry.kind.as_str(),
            entry.date_str().as_str(),
            format_time(entry.start).as_str(),
            format_time(entry.end).as_str(),
            entry.duration_hours.to_string().as_str(),
            entry.labor_type.as_deref().unwrap_or(""),
            entry.source_format.as_str(),
            if entry.demo { "true" } else { "false" },
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_time(time: Option<chrono::NaiveDateTime>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn format_text(entries: &[TimeEntry]) -> String {
    if entries.is_empty() {
        return "No time entries found.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {}  {}h",
            entry.identifier, entry.employee_name, entry.duration_hours
        ));
        if let (Some(start), Some(end)) = (entry.start, entry.end) {
            output.push_str(&format!(
                "  {} - {}",
                start.format("%m/%d/%Y %I:%M %p"),
                end.format("%m/%d/%Y %I:%M %p")
            ));
        } else if entry.work_date.is_some() {
            output.push_str(&format!("  {}", entry.date_str()));
        }
        if let Some(labor_type) = &entry.labor_type {
            output.push_str(&format!("  [{}]", labor_type));
        }
        if entry.demo {
            output.push_str("  (demo)");
        }
        output.push('\n');
    }

    let total: Decimal = entries.iter().map(|e| e.duration_hours).sum();
    output.push_str(&format!("\nTotal: {}h in {} entries\n", total, entries.len()));

    output
}
