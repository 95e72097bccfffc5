//! Declarative threshold rules
//!
//! Classification is expressed as data: a [`RuleTable`] is an ordered list of
//! `(conditions, label)` pairs evaluated top to bottom where the first rule
//! whose conditions all hold wins, and a [`Checklist`] collects the label of
//! every rule that holds. Both read their inputs through [`Evidence`], so the
//! tables can be exercised directly with hand-built statistics.

use crate::features::DerivedFeatures;
use crate::region::RegionName;
use crate::sampler::FaceSamples;

/// Scalar a rule condition can test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    TzoneOil,
    CheeksRed,
    UnderEyeDark,
    TextureAvg,
    PoresScore,
    Oiliness,
    Dryness,
    RednessScore,
    WrinklesScore,
    Melanin,
    BAge,
    /// `|cheek_left.brightness - cheek_right.brightness|`
    CheekImbalance,
    /// Largest of `cheek.brightness - nose.brightness` over both cheeks
    CheekOverNose,
    /// Redness ratio of a single region
    Redness(RegionName),
}

/// Strict comparison against a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Above(f64),
    Below(f64),
}

impl Bound {
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Bound::Above(threshold) => value > threshold,
            Bound::Below(threshold) => value < threshold,
        }
    }
}

/// A single `signal <op> threshold` test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub signal: Signal,
    pub bound: Bound,
}

impl Condition {
    pub const fn above(signal: Signal, threshold: f64) -> Self {
        Self {
            signal,
            bound: Bound::Above(threshold),
        }
    }

    pub const fn below(signal: Signal, threshold: f64) -> Self {
        Self {
            signal,
            bound: Bound::Below(threshold),
        }
    }

    pub fn holds(&self, evidence: &Evidence) -> bool {
        self.bound.holds(evidence.value(self.signal))
    }
}

/// Conjunction of conditions mapped to a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule<L: 'static> {
    pub when: &'static [Condition],
    pub label: L,
}

impl<L: Copy> Rule<L> {
    pub fn matches(&self, evidence: &Evidence) -> bool {
        self.when.iter().all(|condition| condition.holds(evidence))
    }
}

/// Ordered first-match-wins cascade with a fallback label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleTable<L: 'static> {
    pub rules: &'static [Rule<L>],
    pub fallback: L,
}

impl<L: Copy> RuleTable<L> {
    pub fn evaluate(&self, evidence: &Evidence) -> L {
        self.rules
            .iter()
            .find(|rule| rule.matches(evidence))
            .map_or(self.fallback, |rule| rule.label)
    }
}

/// Collects every matching label, in rule order, or a lone placeholder when
/// nothing matches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checklist<L: 'static> {
    pub rules: &'static [Rule<L>],
    pub when_empty: L,
}

impl<L: Copy> Checklist<L> {
    pub fn evaluate(&self, evidence: &Evidence) -> Vec<L> {
        let hits: Vec<L> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(evidence))
            .map(|rule| rule.label)
            .collect();

        if hits.is_empty() {
            vec![self.when_empty]
        } else {
            hits
        }
    }
}

/// Read-only view over everything rules may test
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub samples: &'a FaceSamples,
    pub features: &'a DerivedFeatures,
}

impl<'a> Evidence<'a> {
    pub fn new(samples: &'a FaceSamples, features: &'a DerivedFeatures) -> Self {
        Self { samples, features }
    }

    pub fn value(&self, signal: Signal) -> f64 {
        let f = self.features;
        let s = self.samples;
        match signal {
            Signal::TzoneOil => f.tzone_oil,
            Signal::CheeksRed => f.cheeks_red,
            Signal::UnderEyeDark => f.under_eye_dark,
            Signal::TextureAvg => f.texture_avg,
            Signal::PoresScore => f.pores_score,
            Signal::Oiliness => f.oiliness,
            Signal::Dryness => f.dryness,
            Signal::RednessScore => f.redness_score,
            Signal::WrinklesScore => f.wrinkles_score,
            Signal::Melanin => f.melanin,
            Signal::BAge => f.b_age,
            Signal::CheekImbalance => (s.cheek_left.brightness - s.cheek_right.brightness).abs(),
            Signal::CheekOverNose => (s.cheek_left.brightness - s.nose.brightness)
                .max(s.cheek_right.brightness - s.nose.brightness),
            Signal::Redness(region) => s.get(region).redness,
        }
    }
}
