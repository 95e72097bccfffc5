//! The analysis report handed back to callers
//!
//! Field names and order are part of the wire contract and serialize verbatim.

use crate::labels::{
    AcneZone, AgeEstimate, DeepWrinkles, FineLines, Hydration, MicroTexture, OilZone,
    Pigmentation, PoreSize, Severity, SkinType, ToneEvenness, VascularSpots,
};
use serde::Serialize;

/// Value reported for conditions the heuristic does not attempt to detect
pub const NOT_DETECTED: &str = "Not detected";

/// Free-text summary attached to every report
pub const SUMMARY: &str = "Automated skin analysis based on regional sampling";

/// Structured skin-condition report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub skin_type: SkinType,
    /// Average texture, two-decimal string
    pub texture: String,
    pub pores: PoreSize,
    pub fine_lines: FineLines,
    pub deep_wrinkles: DeepWrinkles,
    pub micro_texture: MicroTexture,
    /// Average cheek brightness, two-decimal string
    pub tone_overall: String,
    pub uneven_tone: ToneEvenness,
    pub pigmentation_level: Pigmentation,
    /// Melanin estimate, two-decimal string
    pub melanin_concentration: String,
    pub acne: Vec<AcneZone>,
    pub redness_inflammation: Severity,
    pub under_eye_darkness: Severity,
    pub eyebags_puffiness: Severity,
    pub sunspots: &'static str,
    pub age_spots: &'static str,
    pub freckles: &'static str,
    pub red_spots_vascular: VascularSpots,
    pub hydration: Hydration,
    pub oil_balance: Vec<OilZone>,
    pub skin_age_estimation: AgeEstimate,
    pub brightness: f64,
    pub redness: f64,
    pub coolness: f64,
    pub summary: &'static str,
    pub recommendations: Vec<&'static str>,
}

impl AnalysisReport {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Round to two decimal places, ties to even on the exact decimal value.
///
/// Agrees with `format2`, so numeric and string fields never disagree.
pub fn round2(value: f64) -> f64 {
    format2(value).parse().unwrap_or(value)
}

/// Format with exactly two decimal places
pub fn format2(value: f64) -> String {
    format!("{value:.2}")
}
