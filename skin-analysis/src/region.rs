//! Facial sampling regions
//!
//! The seven regions are fixed rectangles anchored on the working-image
//! center. They approximate where the forehead, nose, cheeks, chin and the
//! skin above the eyes sit in a centered, front-facing portrait.

use crate::working_size::WorkingSize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named anatomical sampling region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionName {
    Forehead,
    Nose,
    CheekLeft,
    CheekRight,
    Chin,
    UpperEyeLeft,
    UpperEyeRight,
}

impl RegionName {
    pub const ALL: [RegionName; 7] = [
        RegionName::Forehead,
        RegionName::Nose,
        RegionName::CheekLeft,
        RegionName::CheekRight,
        RegionName::Chin,
        RegionName::UpperEyeLeft,
        RegionName::UpperEyeRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionName::Forehead => "forehead",
            RegionName::Nose => "nose",
            RegionName::CheekLeft => "cheek_left",
            RegionName::CheekRight => "cheek_right",
            RegionName::Chin => "chin",
            RegionName::UpperEyeLeft => "upper_eye_left",
            RegionName::UpperEyeRight => "upper_eye_right",
        }
    }

    /// Anchor of this region in [`FACE_REGIONS`]
    pub fn anchor(&self) -> RegionAnchor {
        FACE_REGIONS[*self as usize].1
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offset of a region's top-left corner from the image center, plus its size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionAnchor {
    pub dx: f64,
    pub dy: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionAnchor {
    const fn new(dx: f64, dy: f64, width: f64, height: f64) -> Self {
        Self {
            dx,
            dy,
            width,
            height,
        }
    }
}

/// Anchor table in working-image pixels, relative to `(cx, cy)`
pub const FACE_REGIONS: [(RegionName, RegionAnchor); 7] = [
    (RegionName::Forehead, RegionAnchor::new(-80.0, -140.0, 160.0, 60.0)),
    (RegionName::Nose, RegionAnchor::new(-40.0, -40.0, 80.0, 80.0)),
    (RegionName::CheekLeft, RegionAnchor::new(-160.0, -20.0, 120.0, 100.0)),
    (RegionName::CheekRight, RegionAnchor::new(40.0, -20.0, 120.0, 100.0)),
    (RegionName::Chin, RegionAnchor::new(-80.0, 80.0, 160.0, 60.0)),
    (RegionName::UpperEyeLeft, RegionAnchor::new(-120.0, -70.0, 80.0, 40.0)),
    (RegionName::UpperEyeRight, RegionAnchor::new(40.0, -70.0, 80.0, 40.0)),
];

/// Rectangle in working-image pixel coordinates.
///
/// May extend past the image edges or have a negative origin; use
/// [`Region::clamp_to`] to get the pixels that actually exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Inclusive pixel bounds of a region after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelBounds {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelBounds {
    /// Number of pixels covered (0 when the bounds are inverted)
    pub fn pixel_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        ((self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Place an anchor on the center of a working image
    pub fn anchored(anchor: &RegionAnchor, size: WorkingSize) -> Self {
        let (cx, cy) = size.center();
        Self::new(cx + anchor.dx, cy + anchor.dy, anchor.width, anchor.height)
    }

    /// Clamp to the image.
    ///
    /// Coordinates truncate toward zero, then `x0 = max(0, x)`,
    /// `x1 = min(width - 1, x + w)` and likewise for y. Both ends are
    /// inclusive, so a region of width `w` spans `w + 1` columns when it
    /// fits entirely inside the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> PixelBounds {
        let max_x = width as i64 - 1;
        let max_y = height as i64 - 1;
        PixelBounds {
            x0: (self.x.trunc() as i64).max(0),
            y0: (self.y.trunc() as i64).max(0),
            x1: ((self.x + self.width).trunc() as i64).min(max_x),
            y1: ((self.y + self.height).trunc() as i64).min(max_y),
        }
    }
}

/// All seven regions placed on a working image of the given size
pub fn face_regions(size: WorkingSize) -> [(RegionName, Region); 7] {
    FACE_REGIONS.map(|(name, anchor)| (name, Region::anchored(&anchor, size)))
}
