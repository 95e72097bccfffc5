//! Synthetic images for tests

use crate::region::{Region, RegionName};
use crate::working_size::WorkingSize;
use image::{Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

/// Image filled with a single color
pub fn flat(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Paint the sampled area of a named region, assuming `image` is already at
/// its working size
pub fn paint_region(image: &mut RgbImage, name: RegionName, color: [u8; 3]) {
    let size = WorkingSize {
        width: image.width(),
        height: image.height(),
    };
    let bounds = Region::anchored(&name.anchor(), size).clamp_to(size.width, size.height);
    if bounds.is_empty() {
        return;
    }

    for y in bounds.y0..=bounds.y1 {
        for x in bounds.x0..=bounds.x1 {
            image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }
}

fn bump(u: f64, v: f64, cu: f64, cv: f64, sigma: f64) -> f64 {
    let d2 = (u - cu).powi(2) + (v - cv).powi(2);
    (-d2 / (2.0 * sigma * sigma)).exp()
}

/// Smooth face-like color field defined on normalized coordinates.
///
/// Because the field is continuous in `(u, v)` it can be rendered at any
/// resolution, and different renders of the same pattern downsample to
/// nearly the same working image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePattern {
    /// Base skin color, 0-255 per channel
    pub base: [f64; 3],
    /// Extra red on both cheeks, fraction of full scale
    pub blush: f64,
    /// Extra brightness on the nose, fraction of full scale
    pub highlight: f64,
    /// Darkening above the eyes, fraction of base
    pub shadow: f64,
    /// Spatial frequency of the low-amplitude shading ripple
    pub ripple_freq: f64,
    pub ripple_phase: f64,
}

impl FacePattern {
    /// Random but reproducible pattern
    pub fn seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let r = rng.random_range(150.0..230.0);
        let g = r * rng.random_range(0.7..0.85);
        let b = g * rng.random_range(0.8..0.95);

        Self {
            base: [r, g, b],
            blush: rng.random_range(0.0..0.15),
            highlight: rng.random_range(0.0..0.12),
            shadow: rng.random_range(0.0..0.3),
            ripple_freq: rng.random_range(1.0..3.0),
            ripple_phase: rng.random_range(0.0..1.0),
        }
    }

    /// Color at normalized position `(u, v)` in `[0, 1]`
    pub fn color_at(&self, u: f64, v: f64) -> Rgb<u8> {
        let ripple = 1.0
            + 0.04
                * (TAU * (self.ripple_freq * u + self.ripple_phase)).sin()
                * (TAU * self.ripple_freq * v).cos();
        let cheeks = bump(u, v, 0.31, 0.56, 0.1) + bump(u, v, 0.69, 0.56, 0.1);
        let nose = bump(u, v, 0.5, 0.5, 0.07);
        let brow =
            1.0 - self.shadow * (bump(u, v, 0.31, 0.38, 0.06) + bump(u, v, 0.69, 0.38, 0.06));

        let lift = 255.0 * self.highlight * nose;
        let channel = |i: usize, extra: f64| {
            (self.base[i] * ripple * brow + lift + extra)
                .round()
                .clamp(0.0, 255.0) as u8
        };

        Rgb([
            channel(0, 255.0 * self.blush * cheeks),
            channel(1, 0.0),
            channel(2, 0.0),
        ])
    }

    /// Render at the given resolution, sampling pixel centers
    pub fn render(&self, width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let u = (x as f64 + 0.5) / width as f64;
            let v = (y as f64 + 0.5) / height as f64;
            self.color_at(u, v)
        })
    }
}
