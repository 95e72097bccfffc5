//! Per-region color and texture statistics
//!
//! A region is scanned once in row-major order. Channel sums give the mean
//! color; the running absolute difference between the luminance of each pixel
//! and the one scanned before it gives a 1-D texture proxy. The proxy is not a
//! 2-D gradient: the previous pixel carries over from the end of one row to
//! the start of the next, and the classifier thresholds assume exactly this.

use crate::region::{Region, RegionName};
use crate::working_size::WorkingSize;
use image::{Rgb, RgbImage};
use log::debug;
use serde::{Deserialize, Serialize};

/// Statistics of one sampled region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    /// Mean luminance scaled to 0-1
    pub brightness: f64,
    /// Mean R over mean G (G floored at 1)
    pub redness: f64,
    /// Mean B over mean R (R floored at 1)
    pub coolness: f64,
    /// Mean absolute luminance step between scan-order neighbours, scaled to 0-1
    pub texture: f64,
    /// Divisor used for the means; at least 1 even for empty regions
    pub pixel_count: usize,
}

/// Single-pass accumulator for [`RegionStats`]
#[derive(Debug, Clone, Default)]
pub struct RegionScan {
    r_sum: f64,
    g_sum: f64,
    b_sum: f64,
    delta_sum: f64,
    previous_luminance: Option<f64>,
    count: usize,
}

impl RegionScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next pixel in scan order
    pub fn push(&mut self, pixel: &Rgb<u8>) {
        let [r, g, b] = pixel.0.map(f64::from);
        self.r_sum += r;
        self.g_sum += g;
        self.b_sum += b;
        self.count += 1;

        let luminance = (r + g + b) / 3.0;
        if let Some(previous) = self.previous_luminance {
            self.delta_sum += (luminance - previous).abs();
        }
        self.previous_luminance = Some(luminance);
    }

    /// Number of pixels pushed so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finish the scan.
    ///
    /// An empty scan reports zeros for every statistic with a divisor of 1.
    pub fn finish(&self) -> RegionStats {
        let n = self.count.max(1) as f64;
        let r_avg = self.r_sum / n;
        let g_avg = self.g_sum / n;
        let b_avg = self.b_sum / n;

        RegionStats {
            brightness: (r_avg + g_avg + b_avg) / 3.0 / 255.0,
            redness: r_avg / g_avg.max(1.0),
            coolness: b_avg / r_avg.max(1.0),
            texture: self.delta_sum / n / 255.0,
            pixel_count: self.count.max(1),
        }
    }
}

/// Sample a region of a working image.
///
/// Never fails: the region is clamped to the image and an empty intersection
/// produces all-zero statistics.
pub fn sample(image: &RgbImage, region: &Region) -> RegionStats {
    let bounds = region.clamp_to(image.width(), image.height());
    let mut scan = RegionScan::new();

    if !bounds.is_empty() {
        for y in bounds.y0..=bounds.y1 {
            for x in bounds.x0..=bounds.x1 {
                scan.push(image.get_pixel(x as u32, y as u32));
            }
        }
    }

    scan.finish()
}

/// Statistics for all seven face regions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceSamples {
    pub forehead: RegionStats,
    pub nose: RegionStats,
    pub cheek_left: RegionStats,
    pub cheek_right: RegionStats,
    pub chin: RegionStats,
    pub upper_eye_left: RegionStats,
    pub upper_eye_right: RegionStats,
}

impl FaceSamples {
    /// Build from a per-region lookup
    pub fn from_fn(mut stats_for: impl FnMut(RegionName) -> RegionStats) -> Self {
        Self {
            forehead: stats_for(RegionName::Forehead),
            nose: stats_for(RegionName::Nose),
            cheek_left: stats_for(RegionName::CheekLeft),
            cheek_right: stats_for(RegionName::CheekRight),
            chin: stats_for(RegionName::Chin),
            upper_eye_left: stats_for(RegionName::UpperEyeLeft),
            upper_eye_right: stats_for(RegionName::UpperEyeRight),
        }
    }

    pub fn get(&self, name: RegionName) -> &RegionStats {
        match name {
            RegionName::Forehead => &self.forehead,
            RegionName::Nose => &self.nose,
            RegionName::CheekLeft => &self.cheek_left,
            RegionName::CheekRight => &self.cheek_right,
            RegionName::Chin => &self.chin,
            RegionName::UpperEyeLeft => &self.upper_eye_left,
            RegionName::UpperEyeRight => &self.upper_eye_right,
        }
    }

    /// Iterate regions in anchor-table order
    pub fn iter(&self) -> impl Iterator<Item = (RegionName, &RegionStats)> {
        RegionName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}

/// Sample every face region of an image that is already at working size
pub fn sample_face(image: &RgbImage) -> FaceSamples {
    let size = WorkingSize {
        width: image.width(),
        height: image.height(),
    };
    let samples =
        FaceSamples::from_fn(|name| sample(image, &Region::anchored(&name.anchor(), size)));

    for (name, stats) in samples.iter() {
        debug!(
            "{name}: brightness={:.4} redness={:.4} coolness={:.4} texture={:.4} n={}",
            stats.brightness, stats.redness, stats.coolness, stats.texture, stats.pixel_count
        );
    }

    samples
}
