//! Categorical labels emitted in the analysis report
//!
//! Each label serializes to the exact display string consumers match on.

use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Report string for this label
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

label_enum!(
    /// Overall skin type
    SkinType {
        Oily => "Oily",
        Dry => "Dry",
        Combination => "Combination",
        Normal => "Normal",
    }
);

label_enum!(
    PoreSize {
        Enlarged => "Enlarged",
        Medium => "Medium",
        Small => "Small",
    }
);

label_enum!(
    FineLines {
        Visible => "Visible",
        Mild => "Mild",
        Absent => "None",
    }
);

label_enum!(
    DeepWrinkles {
        Present => "Present",
        Low => "Low",
    }
);

label_enum!(
    MicroTexture {
        Coarse => "Coarse",
        Smooth => "Smooth",
    }
);

label_enum!(
    ToneEvenness {
        Uneven => "Uneven",
        Even => "Even",
    }
);

label_enum!(
    /// Pigmentation grade derived from the melanin estimate
    Pigmentation {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
);

label_enum!(
    /// Three-step grade shared by redness, under-eye darkness and puffiness
    Severity {
        High => "High",
        Moderate => "Moderate",
        Low => "Low",
    }
);

label_enum!(
    VascularSpots {
        Possible => "Possible",
        Low => "Low",
    }
);

label_enum!(
    Hydration {
        Good => "Good",
        Moderate => "Moderate",
        Low => "Low",
    }
);

label_enum!(
    /// Apparent skin age relative to actual age
    AgeEstimate {
        Younger => "Younger than actual",
        Near => "Near actual age",
        Older => "Older than actual",
    }
);

label_enum!(
    /// Zone flagged for acne-like redness
    AcneZone {
        LeftCheek => "Left cheek",
        RightCheek => "Right cheek",
        TZone => "T-zone",
        Clear => "None",
    }
);

label_enum!(
    /// Zone flagged for excess sebum
    OilZone {
        TZone => "T-zone",
        Cheeks => "Cheeks",
        Balanced => "Balanced",
    }
);
