//! Classify command - report which layout a transcript looks like.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use punchscan_core::{classify, normalize_text};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Text files to classify
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Classify the raw text without normalizing it first
    #[arg(long)]
    raw: bool,

    /// Print the normalized text after the format
    #[arg(long)]
    show_normalized: bool,
}

pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let multiple = args.inputs.len() > 1;

    for input in &args.inputs {
        let text = fs::read_to_string(input)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", input.display(), e))?;
        let text = if args.raw { text } else { normalize_text(&text) };
        let format = classify(&text);

        if multiple {
            println!("{}\t{}", input.display(), format);
        } else {
            println!("{}", format);
        }

        if args.show_normalized {
            println!("{}", text);
        }
    }

    Ok(())
}
