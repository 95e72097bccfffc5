//! Threshold cascade from derived features to report labels

use crate::features::DerivedFeatures;
use crate::labels::{
    AcneZone, AgeEstimate, DeepWrinkles, FineLines, Hydration, MicroTexture, OilZone,
    Pigmentation, PoreSize, Severity, SkinType, ToneEvenness, VascularSpots,
};
use crate::region::RegionName;
use crate::report::{format2, round2, AnalysisReport, NOT_DETECTED, SUMMARY};
use crate::rules::{Checklist, Condition, Evidence, Rule, RuleTable, Signal};
use crate::sampler::FaceSamples;

/// Region redness ratio above which the region is flagged for acne
pub const ACNE_REDNESS_RATIO: f64 = 1.25;

pub const HYDRATION_TIP: &str = "Increase hydration; use hyaluronic acid serums";
pub const SEBUM_TIP: &str = "Use non-comedogenic moisturizers; control sebum in T-zone";
pub const CALMING_TIP: &str = "Consider calming products with niacinamide";
pub const RETINOID_TIP: &str = "Introduce retinoids and sunscreen daily";
pub const TONE_TIP: &str = "Use vitamin C and SPF to even tone";

pub const SKIN_TYPE: RuleTable<SkinType> = RuleTable {
    rules: &[
        Rule {
            when: &[
                Condition::above(Signal::Oiliness, 0.12),
                Condition::below(Signal::Dryness, 0.1),
            ],
            label: SkinType::Oily,
        },
        Rule {
            when: &[
                Condition::above(Signal::Dryness, 0.15),
                Condition::below(Signal::Oiliness, 0.08),
            ],
            label: SkinType::Dry,
        },
        Rule {
            when: &[
                Condition::above(Signal::Oiliness, 0.1),
                Condition::above(Signal::Dryness, 0.12),
            ],
            label: SkinType::Combination,
        },
    ],
    fallback: SkinType::Normal,
};

pub const PORES: RuleTable<PoreSize> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::above(Signal::PoresScore, 0.4)],
            label: PoreSize::Enlarged,
        },
        Rule {
            when: &[Condition::above(Signal::PoresScore, 0.25)],
            label: PoreSize::Medium,
        },
    ],
    fallback: PoreSize::Small,
};

pub const FINE_LINES: RuleTable<FineLines> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::above(Signal::WrinklesScore, 0.25)],
            label: FineLines::Visible,
        },
        Rule {
            when: &[Condition::above(Signal::WrinklesScore, 0.1)],
            label: FineLines::Mild,
        },
    ],
    fallback: FineLines::Absent,
};

pub const DEEP_WRINKLES: RuleTable<DeepWrinkles> = RuleTable {
    rules: &[Rule {
        when: &[Condition::above(Signal::WrinklesScore, 0.5)],
        label: DeepWrinkles::Present,
    }],
    fallback: DeepWrinkles::Low,
};

pub const MICRO_TEXTURE: RuleTable<MicroTexture> = RuleTable {
    rules: &[Rule {
        when: &[Condition::above(Signal::TextureAvg, 0.25)],
        label: MicroTexture::Coarse,
    }],
    fallback: MicroTexture::Smooth,
};

pub const UNEVEN_TONE: RuleTable<ToneEvenness> = RuleTable {
    rules: &[Rule {
        when: &[Condition::above(Signal::CheekImbalance, 0.08)],
        label: ToneEvenness::Uneven,
    }],
    fallback: ToneEvenness::Even,
};

pub const PIGMENTATION: RuleTable<Pigmentation> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::above(Signal::Melanin, 0.3)],
            label: Pigmentation::High,
        },
        Rule {
            when: &[Condition::above(Signal::Melanin, 0.18)],
            label: Pigmentation::Medium,
        },
    ],
    fallback: Pigmentation::Low,
};

pub const ACNE: Checklist<AcneZone> = Checklist {
    rules: &[
        Rule {
            when: &[Condition::above(
                Signal::Redness(RegionName::CheekLeft),
                ACNE_REDNESS_RATIO,
            )],
            label: AcneZone::LeftCheek,
        },
        Rule {
            when: &[Condition::above(
                Signal::Redness(RegionName::CheekRight),
                ACNE_REDNESS_RATIO,
            )],
            label: AcneZone::RightCheek,
        },
        Rule {
            when: &[Condition::above(
                Signal::Redness(RegionName::Nose),
                ACNE_REDNESS_RATIO,
            )],
            label: AcneZone::TZone,
        },
    ],
    when_empty: AcneZone::Clear,
};

pub const REDNESS_INFLAMMATION: RuleTable<Severity> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::above(Signal::RednessScore, 0.2)],
            label: Severity::High,
        },
        Rule {
            when: &[Condition::above(Signal::RednessScore, 0.1)],
            label: Severity::Moderate,
        },
    ],
    fallback: Severity::Low,
};

pub const UNDER_EYE_DARKNESS: RuleTable<Severity> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::above(Signal::UnderEyeDark, 0.4)],
            label: Severity::High,
        },
        Rule {
            when: &[Condition::above(Signal::UnderEyeDark, 0.25)],
            label: Severity::Moderate,
        },
    ],
    fallback: Severity::Low,
};

pub const EYEBAGS_PUFFINESS: RuleTable<Severity> = RuleTable {
    rules: &[Rule {
        when: &[Condition::above(Signal::TextureAvg, 0.22)],
        label: Severity::Moderate,
    }],
    fallback: Severity::Low,
};

pub const RED_SPOTS_VASCULAR: RuleTable<VascularSpots> = RuleTable {
    rules: &[Rule {
        when: &[Condition::above(Signal::RednessScore, 0.25)],
        label: VascularSpots::Possible,
    }],
    fallback: VascularSpots::Low,
};

pub const HYDRATION: RuleTable<Hydration> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::below(Signal::Dryness, 0.1)],
            label: Hydration::Good,
        },
        Rule {
            when: &[Condition::below(Signal::Dryness, 0.2)],
            label: Hydration::Moderate,
        },
    ],
    fallback: Hydration::Low,
};

pub const OIL_BALANCE: Checklist<OilZone> = Checklist {
    rules: &[
        Rule {
            when: &[Condition::above(Signal::TzoneOil, 0.08)],
            label: OilZone::TZone,
        },
        Rule {
            when: &[Condition::above(Signal::CheekOverNose, 0.05)],
            label: OilZone::Cheeks,
        },
    ],
    when_empty: OilZone::Balanced,
};

pub const SKIN_AGE: RuleTable<AgeEstimate> = RuleTable {
    rules: &[
        Rule {
            when: &[Condition::below(Signal::BAge, 0.25)],
            label: AgeEstimate::Younger,
        },
        Rule {
            when: &[Condition::below(Signal::BAge, 0.5)],
            label: AgeEstimate::Near,
        },
    ],
    fallback: AgeEstimate::Older,
};

/// Care tips in fixed order, keeping only those whose trigger fired
pub fn recommendations(
    skin_type: SkinType,
    pigmentation: Pigmentation,
    features: &DerivedFeatures,
) -> Vec<&'static str> {
    [
        (skin_type == SkinType::Dry).then_some(HYDRATION_TIP),
        (skin_type == SkinType::Oily).then_some(SEBUM_TIP),
        (features.redness_score > 0.2).then_some(CALMING_TIP),
        (features.wrinkles_score > 0.25).then_some(RETINOID_TIP),
        (pigmentation != Pigmentation::Low).then_some(TONE_TIP),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Produce the report for one face.
///
/// Pure and total: every combination of inputs yields a complete report.
pub fn classify(samples: &FaceSamples, features: &DerivedFeatures) -> AnalysisReport {
    let evidence = Evidence::new(samples, features);

    let skin_type = SKIN_TYPE.evaluate(&evidence);
    let pigmentation_level = PIGMENTATION.evaluate(&evidence);

    AnalysisReport {
        skin_type,
        texture: format2(features.texture_avg),
        pores: PORES.evaluate(&evidence),
        fine_lines: FINE_LINES.evaluate(&evidence),
        deep_wrinkles: DEEP_WRINKLES.evaluate(&evidence),
        micro_texture: MICRO_TEXTURE.evaluate(&evidence),
        tone_overall: format2(features.cheek_brightness),
        uneven_tone: UNEVEN_TONE.evaluate(&evidence),
        pigmentation_level,
        melanin_concentration: format2(features.melanin),
        acne: ACNE.evaluate(&evidence),
        redness_inflammation: REDNESS_INFLAMMATION.evaluate(&evidence),
        under_eye_darkness: UNDER_EYE_DARKNESS.evaluate(&evidence),
        eyebags_puffiness: EYEBAGS_PUFFINESS.evaluate(&evidence),
        sunspots: NOT_DETECTED,
        age_spots: NOT_DETECTED,
        freckles: NOT_DETECTED,
        red_spots_vascular: RED_SPOTS_VASCULAR.evaluate(&evidence),
        hydration: HYDRATION.evaluate(&evidence),
        oil_balance: OIL_BALANCE.evaluate(&evidence),
        skin_age_estimation: SKIN_AGE.evaluate(&evidence),
        brightness: round2(features.cheek_brightness),
        redness: round2(features.cheeks_red),
        coolness: round2(features.cheek_coolness),
        summary: SUMMARY,
        recommendations: recommendations(skin_type, pigmentation_level, features),
    }
}
