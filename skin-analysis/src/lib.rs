//! Regional skin-condition heuristics for face photographs.
//!
//! An image is normalized to a 512-pixel-wide working copy, seven fixed
//! face regions are sampled relative to its center, the region statistics
//! are combined into composite features, and threshold rule tables turn the
//! features into a flat report. No face detection is performed; the subject
//! is assumed to be centered and frontal.
//!
//! ```no_run
//! use skin_analysis::SkinAnalyzer;
//!
//! let bytes = std::fs::read("face.jpg").unwrap();
//! let report = SkinAnalyzer::default().analyze_bytes(&bytes).unwrap();
//! println!("{}", report.to_json().unwrap());
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod labels;
pub mod pipeline;
pub mod region;
pub mod report;
pub mod rules;
pub mod sampler;
pub mod test_util;
pub mod working_size;

pub use config::{AnalyzerConfig, ConfigStorage};
pub use error::{AnalysisError, ErrorKind, ErrorResponse};
pub use features::{aggregate, DerivedFeatures};
pub use pipeline::{decode_rgb, Analysis, SkinAnalyzer};
pub use region::{Region, RegionName};
pub use report::AnalysisReport;
pub use sampler::{sample, sample_face, FaceSamples, RegionStats};
pub use working_size::{ResampleFilter, WorkingSize};
