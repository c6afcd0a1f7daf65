//! Batch command - extract time entries from many files concurrently.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use punchscan_core::ExtractionOutcome;

use super::parse::{format_outcome, OutputFormat};
use super::{build_extractor, extract_path, load_config, resolve_hint, InputKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Format hint applied to every file
    #[arg(long)]
    hint: Option<String>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<ExtractionOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl FileResult {
    fn status(&self) -> &'static str {
        match &self.outcome {
            Some(ExtractionOutcome::Parsed(_)) => "parsed",
            Some(ExtractionOutcome::CannotExtract { .. }) => "cannot_extract",
            Some(ExtractionOutcome::Demo { .. }) => "demo",
            None => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }
    let hint = resolve_hint(args.hint.as_deref(), &config)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| InputKind::of(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let needs_ocr = files.iter().any(|p| InputKind::of(p) == Some(InputKind::Image));
    let extractor = Arc::new(build_extractor(&config, needs_ocr));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let extractor = Arc::clone(&extractor);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = extract_path(&path, &extractor, hint);
            (index, path, result, file_start.elapsed().as_millis() as u64)
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, path, result, processing_time_ms) = joined?;
        overall_pb.inc(1);

        match result {
            Ok(outcome) => results.push((
                index,
                FileResult {
                    path,
                    outcome: Some(outcome),
                    error: None,
                    processing_time_ms,
                },
            )),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push((
                        index,
                        FileResult {
                            path,
                            outcome: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        },
                    ));
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    tasks.abort_all();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }
    }

    overall_pb.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = results.into_iter().map(|(_, r)| r).collect();

    if let Some(output_dir) = &args.output_dir {
        let paths: Vec<&Path> = results.iter().map(|r| r.path.as_path()).collect();
        let names = output_names(&paths, args.format.extension());
        for (result, name) in results.iter().zip(&names) {
            if let Some(outcome) = &result.outcome {
                let output_path = output_dir.join(name);

                fs::write(&output_path, format_outcome(outcome, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let entries: usize = results
        .iter()
        .filter_map(|r| r.outcome.as_ref())
        .map(|o| o.entries().len())
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} entries, {} successful, {} failed",
        style(entries).cyan(),
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file names, one per input: the file stem, or the full file name
/// when two inputs share a stem, with a numeric suffix for any remaining clash.
fn output_names(paths: &[&Path], extension: &str) -> Vec<String> {
    fn part(s: Option<&std::ffi::OsStr>) -> String {
        s.and_then(|s| s.to_str()).unwrap_or("entries").to_string()
    }

    let mut stems: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *stems.entry(part(path.file_stem())).or_default() += 1;
    }

    let mut used = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let stem = part(path.file_stem());
            let base = if stems[&stem] > 1 {
                part(path.file_name())
            } else {
                stem
            };

            let mut name = format!("{}.{}", base, extension);
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}-{}.{}", base, n, extension);
                n += 1;
            }
            name
        })
        .collect()
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "format",
        "entries",
        "total_hours",
        "discarded",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let (format, discarded, warnings) = match &result.outcome {
            Some(ExtractionOutcome::Parsed(report)) => (
                report.format.as_str(),
                report.discarded.len().to_string(),
                report.warnings.len().to_string(),
            ),
            _ => ("", String::new(), String::new()),
        };
        let entries = result.outcome.as_ref().map(|o| o.entries()).unwrap_or(&[]);
        let total: Decimal = entries.iter().map(|e| e.duration_hours).sum();
        let error = match &result.outcome {
            Some(ExtractionOutcome::CannotExtract { reason }) => reason.as_str(),
            _ => result.error.as_deref().unwrap_or(""),
        };

        wtr.write_record([
            filename,
            result.status(),
            format,
            entries.len().to_string().as_str(),
            total.to_string().as_str(),
            discarded.as_str(),
            warnings.as_str(),
            result.processing_time_ms.to_string().as_str(),
            error,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names_keep_stems_when_unique() {
        let paths = [Path::new("in/a.txt"), Path::new("in/b.png")];
        assert_eq!(output_names(&paths, "json"), vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_output_names_shared_stem() {
        let paths = [
            Path::new("in/a.txt"),
            Path::new("in/a.png"),
            Path::new("other/a.txt"),
            Path::new("in/b.txt"),
        ];
        assert_eq!(
            output_names(&paths, "csv"),
            vec!["a.txt.csv", "a.png.csv", "a.txt-2.csv", "b.csv"]
        );
    }
}
