//! Analyze a single face photograph and print the report as JSON
//!
//! Usage:
//! ```
//! cargo run --release --bin skin_analyze -- face.jpg --pretty
//! ```
//!
//! Exit codes: 0 on success, 2 when the input is missing, oversize or
//! undecodable, 1 for anything else.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde::Serialize;
use skin_analysis::{ErrorResponse, SkinAnalyzer};
use skin_tools::{inspect_path, init_logging, AnalyzerArgs, ToolError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "skin_analyze",
    about = "Regional skin-condition analysis of one face photograph",
    long_about = "Normalizes the image to a 512-pixel-wide working copy, samples seven \
        fixed face regions around the center and prints a JSON report. The subject \
        is assumed to be centered and facing the camera."
)]
struct Args {
    /// Image to analyze (JPEG, PNG, WebP, ...)
    image: PathBuf,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include working size, per-region statistics and derived features
    #[arg(long)]
    details: bool,

    #[command(flatten)]
    analyzer: AnalyzerArgs,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args
        .analyzer
        .resolve()
        .context("Failed to load analyzer config")?;
    let analyzer = SkinAnalyzer::from_config(&config);
    let pretty = args.pretty || config.pretty;

    let analysis = inspect_path(&analyzer, &args.image, config.max_input_bytes)?;
    let json = if args.details {
        to_json(&analysis, pretty)?
    } else {
        to_json(&analysis.report, pretty)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.analyzer.verbose);

    let Err(err) = run(&args) else {
        return ExitCode::SUCCESS;
    };

    let (body, code) = match err.downcast_ref::<ToolError>() {
        Some(tool_err) => (tool_err.to_response(), tool_err.exit_code()),
        None => (
            ErrorResponse {
                error: format!("{err:#}"),
            },
            1,
        ),
    };

    error!("{}: {err:#}", args.image.display());
    match serde_json::to_string(&body) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Failed to serialize error body: {e}"),
    }
    ExitCode::from(code)
}
