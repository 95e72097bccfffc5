//! Working resolution and resampling
//!
//! Every analysis runs on an image normalized to a fixed width so that the
//! region anchors, which are absolute pixel offsets, land on the same facial
//! landmarks regardless of the source resolution.

use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the working image in pixels
pub const WORKING_WIDTH: u32 = 512;

/// Smallest height of the working image in pixels
pub const MIN_WORKING_HEIGHT: u32 = 256;

/// Working image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkingSize {
    /// Image width in pixels (always [`WORKING_WIDTH`])
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl WorkingSize {
    /// Compute the working size for a source image.
    ///
    /// Width is fixed at 512; height keeps the source aspect ratio,
    /// `round(512 * h / w)`, but never drops below 256.
    pub fn for_source(source_width: u32, source_height: u32) -> Self {
        let aspect = source_height as f64 / source_width.max(1) as f64;
        let scaled = (WORKING_WIDTH as f64 * aspect).round() as u32;
        Self {
            width: WORKING_WIDTH,
            height: scaled.max(MIN_WORKING_HEIGHT),
        }
    }

    /// Center of the working image, `(width / 2, height / 2)`
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Convert to tuple (width, height)
    pub fn to_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<WorkingSize> for (u32, u32) {
    fn from(size: WorkingSize) -> Self {
        size.to_tuple()
    }
}

impl fmt::Display for WorkingSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resampling filter used to reach the working size.
///
/// All filters are deterministic. The classifier thresholds were tuned on
/// bilinear output, which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    /// All filters, in the order they are listed to users
    pub const ALL: [ResampleFilter; 5] = [
        ResampleFilter::Nearest,
        ResampleFilter::Triangle,
        ResampleFilter::CatmullRom,
        ResampleFilter::Gaussian,
        ResampleFilter::Lanczos3,
    ];

    /// Name used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmull_rom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }

    fn filter_type(&self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|filter| filter.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                format!(
                    "Unknown resample filter '{s}' (expected one of: {})",
                    known.join(", ")
                )
            })
    }
}

/// Resize an image to its working size.
///
/// Images already at the working size are returned unchanged, so synthetic
/// fixtures drawn at 512 wide sample exactly the pixels they were built with.
/// A source with no pixels yields a black working image.
pub fn resize_to_working(image: &RgbImage, filter: ResampleFilter) -> RgbImage {
    let size = WorkingSize::for_source(image.width(), image.height());

    if image.dimensions() == size.to_tuple() {
        return image.clone();
    }

    if image.width() == 0 || image.height() == 0 {
        return RgbImage::new(size.width, size.height);
    }

    imageops::resize(image, size.width, size.height, filter.filter_type())
}
