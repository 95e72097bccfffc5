//! Derived skin features
//!
//! Combines the seven region statistics into the composite scores the
//! classifier grades. The constants are empirical tuning values; changing any
//! of them shifts every downstream threshold.

use crate::sampler::FaceSamples;
use serde::{Deserialize, Serialize};

/// Mean cheek brightness below which skin counts as dry
pub const DRYNESS_BRIGHTNESS_REF: f64 = 0.6;

/// Cheek redness ratio at which redness starts to score
pub const NEUTRAL_REDNESS_RATIO: f64 = 1.0;

/// Average texture below which no wrinkle signal is scored
pub const WRINKLE_TEXTURE_FLOOR: f64 = 0.18;

/// Gain from average texture to pore score
pub const PORE_TEXTURE_GAIN: f64 = 1.4;

/// Weight of under-eye darkness in the biological-age composite
pub const UNDER_EYE_AGE_WEIGHT: f64 = 0.5;

fn avg(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Composite features computed from [`FaceSamples`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Nose brightness minus mean cheek brightness
    pub tzone_oil: f64,
    /// Mean cheek redness ratio
    pub cheeks_red: f64,
    /// One minus mean brightness above the eyes, never negative
    pub under_eye_dark: f64,
    /// Mean of cheek texture and forehead/chin texture
    pub texture_avg: f64,
    pub pores_score: f64,
    pub oiliness: f64,
    pub dryness: f64,
    pub redness_score: f64,
    pub wrinkles_score: f64,
    /// One minus mean cheek brightness, never negative
    pub melanin: f64,
    /// Biological-age proxy: wrinkles + pores + redness + half the under-eye darkness
    pub b_age: f64,
    /// Mean cheek brightness
    pub cheek_brightness: f64,
    /// Mean cheek coolness ratio
    pub cheek_coolness: f64,
}

/// Aggregate region statistics into derived features
pub fn aggregate(samples: &FaceSamples) -> DerivedFeatures {
    let cheek_left = &samples.cheek_left;
    let cheek_right = &samples.cheek_right;

    let cheek_brightness = avg(cheek_left.brightness, cheek_right.brightness);
    let cheek_coolness = avg(cheek_left.coolness, cheek_right.coolness);

    let tzone_oil = samples.nose.brightness - cheek_brightness;
    let cheeks_red = avg(cheek_left.redness, cheek_right.redness);
    let under_eye_dark = 1.0
        - avg(
            samples.upper_eye_left.brightness,
            samples.upper_eye_right.brightness,
        )
        .min(1.0);
    let texture_avg = avg(
        avg(cheek_left.texture, cheek_right.texture),
        avg(samples.forehead.texture, samples.chin.texture),
    );

    let pores_score = (texture_avg * PORE_TEXTURE_GAIN).max(0.0);
    let oiliness = tzone_oil.max(0.0);
    let dryness = (DRYNESS_BRIGHTNESS_REF - cheek_brightness).max(0.0);
    let redness_score = (cheeks_red - NEUTRAL_REDNESS_RATIO).max(0.0);
    let wrinkles_score = (texture_avg - WRINKLE_TEXTURE_FLOOR).max(0.0);
    let melanin = 1.0 - cheek_brightness.min(1.0);
    let b_age =
        wrinkles_score + pores_score + redness_score + under_eye_dark * UNDER_EYE_AGE_WEIGHT;

    DerivedFeatures {
        tzone_oil,
        cheeks_red,
        under_eye_dark,
        texture_avg,
        pores_score,
        oiliness,
        dryness,
        redness_score,
        wrinkles_score,
        melanin,
        b_age,
        cheek_brightness,
        cheek_coolness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionName;
    use crate::sampler::RegionStats;
    use approx::assert_relative_eq;

    fn stats(brightness: f64, redness: f64, coolness: f64, texture: f64) -> RegionStats {
        RegionStats {
            brightness,
            redness,
            coolness,
            texture,
            pixel_count: 1,
        }
    }

    fn uniform(region: RegionStats) -> FaceSamples {
        FaceSamples::from_fn(|_| region)
    }

    #[test]
    fn test_flat_gray_features() {
        let b = 128.0 / 255.0;
        let features = aggregate(&uniform(stats(b, 1.0, 1.0, 0.0)));

        assert_relative_eq!(features.tzone_oil, 0.0);
        assert_relative_eq!(features.oiliness, 0.0);
        // 0.6 - 0.50196 = 0.09804, just under the 0.1 dry cut-off
        assert_relative_eq!(features.dryness, 0.6 - b, epsilon = 1e-12);
        assert!(features.dryness < 0.1);
        assert_relative_eq!(features.melanin, 1.0 - b, epsilon = 1e-12);
        assert_relative_eq!(features.under_eye_dark, 1.0 - b, epsilon = 1e-12);
        assert_eq!(features.texture_avg, 0.0);
        assert_eq!(features.pores_score, 0.0);
        assert_eq!(features.wrinkles_score, 0.0);
        assert_eq!(features.redness_score, 0.0);
        assert_relative_eq!(features.b_age, (1.0 - b) * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_texture_average_weights_groups_equally() {
        let samples = FaceSamples::from_fn(|name| match name {
            RegionName::CheekLeft => stats(0.5, 1.0, 1.0, 0.4),
            RegionName::CheekRight => stats(0.5, 1.0, 1.0, 0.2),
            RegionName::Forehead => stats(0.5, 1.0, 1.0, 0.1),
            RegionName::Chin => stats(0.5, 1.0, 1.0, 0.1),
            _ => stats(0.5, 1.0, 1.0, 0.9),
        });
        let features = aggregate(&samples);

        // avg(avg(0.4, 0.2), avg(0.1, 0.1)) = avg(0.3, 0.1) = 0.2
        assert_relative_eq!(features.texture_avg, 0.2, epsilon = 1e-12);
        assert_relative_eq!(features.pores_score, 0.28, epsilon = 1e-12);
        assert_relative_eq!(features.wrinkles_score, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_bright_nose_scores_oil() {
        let samples = FaceSamples::from_fn(|name| match name {
            RegionName::Nose => stats(0.8, 1.0, 1.0, 0.0),
            _ => stats(0.6, 1.0, 1.0, 0.0),
        });
        let features = aggregate(&samples);

        assert_relative_eq!(features.tzone_oil, 0.2, epsilon = 1e-12);
        assert_relative_eq!(features.oiliness, 0.2, epsilon = 1e-12);
        assert_eq!(features.dryness, 0.0);
    }

    #[test]
    fn test_dark_nose_clamps_oiliness() {
        let samples = FaceSamples::from_fn(|name| match name {
            RegionName::Nose => stats(0.3, 1.0, 1.0, 0.0),
            _ => stats(0.6, 1.0, 1.0, 0.0),
        });
        let features = aggregate(&samples);

        assert!(features.tzone_oil < 0.0);
        assert_eq!(features.oiliness, 0.0);
    }

    #[test]
    fn test_redness_score() {
        let samples = FaceSamples::from_fn(|name| match name {
            RegionName::CheekLeft => stats(0.5, 2.0, 1.0, 0.0),
            _ => stats(0.5, 1.0, 1.0, 0.0),
        });
        let features = aggregate(&samples);

        assert_relative_eq!(features.cheeks_red, 1.5, epsilon = 1e-12);
        assert_relative_eq!(features.redness_score, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_greenish_cheeks_do_not_score_redness() {
        let features = aggregate(&uniform(stats(0.5, 0.7, 1.0, 0.0)));
        assert_eq!(features.redness_score, 0.0);
    }

    #[test]
    fn test_saturated_brightness_clamps_darkness_and_melanin() {
        // Brightness above 1 cannot come from the sampler but the clamp holds anyway
        let features = aggregate(&uniform(stats(1.2, 1.0, 1.0, 0.0)));
        assert_eq!(features.under_eye_dark, 0.0);
        assert_eq!(features.melanin, 0.0);
    }

    #[test]
    fn test_cheek_averages() {
        let samples = FaceSamples::from_fn(|name| match name {
            RegionName::CheekLeft => stats(0.4, 1.0, 0.8, 0.0),
            RegionName::CheekRight => stats(0.6, 1.0, 1.0, 0.0),
            _ => stats(0.5, 1.0, 1.0, 0.0),
        });
        let features = aggregate(&samples);
        assert_relative_eq!(features.cheek_brightness, 0.5, epsilon = 1e-12);
        assert_relative_eq!(features.cheek_coolness, 0.9, epsilon = 1e-12);
    }
}
