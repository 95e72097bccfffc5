//! Analyze many face photographs in parallel
//!
//! Directories are expanded to the image files they contain. Writes a CSV
//! summary with one row per input and, optionally, a JSONL file holding the
//! full report of every image that was analyzed.
//!
//! Usage:
//! ```
//! cargo run --release --bin skin_batch -- photos/ -r --jsonl reports.jsonl
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use skin_analysis::{AnalysisReport, SkinAnalyzer};
use skin_tools::{
    analyze_path, expand_inputs, init_logging, AnalyzerArgs, BatchRow, JsonlRecord, ToolError,
};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Default filename for the CSV summary
const DEFAULT_CSV_FILENAME: &str = "skin_batch.csv";

#[derive(Parser, Debug)]
#[command(
    name = "skin_batch",
    about = "Regional skin-condition analysis over many images",
    long_about = None
)]
struct Args {
    /// Image files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// CSV summary output
    #[arg(long, default_value = DEFAULT_CSV_FILENAME)]
    csv: PathBuf,

    /// Also write full reports, one JSON object per line
    #[arg(long, value_name = "FILE")]
    jsonl: Option<PathBuf>,

    /// Process one file at a time
    #[arg(long, conflicts_with = "threads")]
    serial: bool,

    /// Worker threads (default: one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    #[command(flatten)]
    analyzer: AnalyzerArgs,
}

type FileResult = (PathBuf, Result<AnalysisReport, ToolError>);

fn progress_bar(len: usize, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );
    Ok(pb)
}

fn write_csv(path: &Path, results: &[FileResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for (input, result) in results {
        writer.serialize(BatchRow::from_result(input, result))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_jsonl(path: &Path, results: &[FileResult]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for (input, result) in results {
        if let Ok(report) = result {
            let record = JsonlRecord {
                path: input.display().to_string(),
                report,
            };
            serde_json::to_writer(&mut writer, &record)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.analyzer.verbose);
    let batch_start = Instant::now();

    let config = args
        .analyzer
        .resolve()
        .context("Failed to load analyzer config")?;
    let analyzer = SkinAnalyzer::from_config(&config);

    let inputs = expand_inputs(&args.inputs, args.recursive)?;
    if inputs.is_empty() {
        bail!(
            "No supported image files found (supported: {})",
            skin_tools::SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    info!("Found {} image files to analyze", inputs.len());

    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        info!("Using {num_threads} threads");
    }

    let pb = progress_bar(inputs.len(), args.quiet)?;
    let failed = AtomicUsize::new(0);

    let analyze_one = |input: &PathBuf| -> FileResult {
        let result = analyze_path(&analyzer, input, config.max_input_bytes);
        if let Err(err) = &result {
            let count = failed.fetch_add(1, Ordering::SeqCst) + 1;
            pb.set_message(format!("{count} failed"));
            warn!("{}: {err}", input.display());
        }
        pb.inc(1);
        (input.clone(), result)
    };

    let results: Vec<FileResult> = if args.serial {
        inputs.iter().map(analyze_one).collect()
    } else {
        inputs.par_iter().map(analyze_one).collect()
    };
    pb.finish_and_clear();

    write_csv(&args.csv, &results)?;
    if let Some(path) = &args.jsonl {
        write_jsonl(path, &results)?;
    }

    let failures: Vec<&FileResult> = results.iter().filter(|(_, r)| r.is_err()).collect();
    let success_count = results.len() - failures.len();
    let elapsed = batch_start.elapsed().as_secs_f64();

    println!("  Successful: {success_count}");
    println!("  Failed:     {}", failures.len());
    println!("  CSV:        {}", args.csv.display());
    if let Some(path) = &args.jsonl {
        println!("  JSONL:      {}", path.display());
    }
    println!("  Total time: {elapsed:.2}s");

    if !failures.is_empty() {
        println!("\nErrors:");
        for (path, result) in &failures {
            if let Err(err) = result {
                println!("  {}: {err}", path.display());
            }
        }
        bail!("{} of {} files failed", failures.len(), results.len());
    }

    Ok(())
}
