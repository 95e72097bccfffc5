//! Shared plumbing for the skin analysis command-line tools

use clap::Args;
use log::{debug, info};
use serde::Serialize;
use skin_analysis::{
    Analysis, AnalysisError, AnalysisReport, AnalyzerConfig, ConfigStorage, ErrorResponse,
    ResampleFilter, SkinAnalyzer,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Image extensions picked up when expanding directories
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

/// Failure reading an input file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} is {size} bytes, limit is {limit}", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can go wrong analyzing one file
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ToolError {
    /// Whether the input itself was at fault (missing, oversize, undecodable)
    pub fn is_client_error(&self) -> bool {
        match self {
            ToolError::Input(InputError::NotFound(_) | InputError::TooLarge { .. }) => true,
            ToolError::Input(InputError::Io { .. }) => false,
            ToolError::Analysis(err) => err.is_client_error(),
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        if self.is_client_error() {
            2
        } else {
            1
        }
    }

    /// JSON body describing this failure
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ToolError::Input(InputError::NotFound(_)) => "image required".to_string(),
            ToolError::Input(InputError::TooLarge { .. }) => "image too large".to_string(),
            ToolError::Input(err @ InputError::Io { .. }) => err.to_string(),
            ToolError::Analysis(err) => return err.to_response(),
        };
        ErrorResponse { error }
    }
}

/// Analyzer options shared by every tool
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzerArgs {
    /// JSON analyzer config; defaults to ~/.skin_config/analyzer.json when present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resampling filter (nearest, triangle, catmull_rom, gaussian, lanczos3)
    #[arg(long)]
    pub filter: Option<ResampleFilter>,

    /// Reject encoded inputs larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_input_bytes: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl AnalyzerArgs {
    /// Merge stored configuration with command-line overrides.
    ///
    /// An explicit `--config` file replaces the stored one; flags win over both.
    pub fn resolve(&self) -> std::io::Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::load_from_file(path)?,
            None => ConfigStorage::new()
                .get_analyzer_config()
                .transpose()?
                .unwrap_or_default(),
        };

        if let Some(filter) = self.filter {
            config.resample = filter;
        }
        if let Some(limit) = self.max_input_bytes {
            config.max_input_bytes = limit;
        }

        debug!("Resolved analyzer config: {config:?}");
        Ok(config)
    }
}

/// Initialize env_logger, honoring RUST_LOG first
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Read an input file, refusing anything over `max_bytes` before reading it
pub fn read_input(path: &Path, max_bytes: u64) -> Result<Vec<u8>, InputError> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::NotFound(path.to_path_buf())
        } else {
            InputError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if metadata.len() > max_bytes {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read, decode and analyze one file, keeping intermediate results
pub fn inspect_path(
    analyzer: &SkinAnalyzer,
    path: &Path,
    max_bytes: u64,
) -> Result<Analysis, ToolError> {
    let bytes = read_input(path, max_bytes)?;
    Ok(analyzer.inspect_upload(Some(&bytes))?)
}

/// Read, decode and analyze one file
pub fn analyze_path(
    analyzer: &SkinAnalyzer,
    path: &Path,
    max_bytes: u64,
) -> Result<AnalysisReport, ToolError> {
    let bytes = read_input(path, max_bytes)?;
    Ok(analyzer.analyze_upload(Some(&bytes))?)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Expand directories into the image files they contain, sorted.
///
/// Plain files are kept regardless of extension.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, InputError> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(InputError::NotFound(input.clone()));
        }
    }

    files.sort();
    info!("Expanded {} input(s) to {} file(s)", inputs.len(), files.len());
    Ok(files)
}

fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), InputError> {
    let io_err = |source: std::io::Error| InputError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();

        if path.is_dir() {
            if recursive {
                collect_images_from_dir(&path, recursive, files)?;
            }
        } else if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// One line of the batch CSV summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub path: String,
    pub ok: bool,
    pub skin_type: Option<String>,
    pub pores: Option<String>,
    pub acne: Option<String>,
    pub redness_inflammation: Option<String>,
    pub hydration: Option<String>,
    pub oil_balance: Option<String>,
    pub skin_age_estimation: Option<String>,
    pub texture: Option<String>,
    pub brightness: Option<f64>,
    pub redness: Option<f64>,
    pub coolness: Option<f64>,
    pub error: Option<String>,
}

fn join_labels<T: ToString>(labels: &[T]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BatchRow {
    pub fn from_report(path: &Path, report: &AnalysisReport) -> Self {
        Self {
            path: path.display().to_string(),
            ok: true,
            skin_type: Some(report.skin_type.to_string()),
            pores: Some(report.pores.to_string()),
            acne: Some(join_labels(&report.acne)),
            redness_inflammation: Some(report.redness_inflammation.to_string()),
            hydration: Some(report.hydration.to_string()),
            oil_balance: Some(join_labels(&report.oil_balance)),
            skin_age_estimation: Some(report.skin_age_estimation.to_string()),
            texture: Some(report.texture.clone()),
            brightness: Some(report.brightness),
            redness: Some(report.redness),
            coolness: Some(report.coolness),
            error: None,
        }
    }

    pub fn from_error(path: &Path, err: &ToolError) -> Self {
        Self {
            path: path.display().to_string(),
            ok: false,
            skin_type: None,
            pores: None,
            acne: None,
            redness_inflammation: None,
            hydration: None,
            oil_balance: None,
            skin_age_estimation: None,
            texture: None,
            brightness: None,
            redness: None,
            coolness: None,
            error: Some(err.to_string()),
        }
    }

    pub fn from_result(path: &Path, result: &Result<AnalysisReport, ToolError>) -> Self {
        match result {
            Ok(report) => Self::from_report(path, report),
            Err(err) => Self::from_error(path, err),
        }
    }
}

/// One line of the batch JSONL output
#[derive(Debug, Serialize)]
pub struct JsonlRecord<'a> {
    pub path: String,
    pub report: &'a AnalysisReport,
}
