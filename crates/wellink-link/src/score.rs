//! Composite 0-100 scoring for the weighted strategy.
//!
//! A well/unit pair earns up to 50 points for the name, 40 for the survey
//! location and 10 for the county. Equal totals are separated by Jaro-Winkler
//! similarity of the scrubbed names.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;
use wellink_normalize::WeightedName;

use crate::config::WeightedConfig;
use crate::index::{UnitView, WellView};

const NAME_MAX: u32 = 50;
const TRS_POINTS: [u32; 4] = [0, 10, 25, 40];
const COUNTY_POINTS: u32 = 10;

/// Score for one well/unit pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeScore {
    /// Sum of all components (0 to 100).
    pub total: u32,
    /// Breakdown of score components for explainability.
    pub explanation: Vec<ScoreComponent>,
}

impl CompositeScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {} ({})", c.name, c.points, c.description))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Total as a confidence score in `0.0..=1.0`.
    pub fn confidence(&self) -> f64 {
        f64::from(self.total) / 100.0
    }
}

/// A component contributing to the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreComponent {
    pub name: &'static str,
    pub points: u32,
    pub description: String,
}

/// Where a total lands against the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AutoLink,
    Review,
    Reject,
}

impl Verdict {
    pub fn classify(total: u32, config: &WeightedConfig) -> Self {
        if total > config.auto_link_above {
            Self::AutoLink
        } else if total >= config.review_at_least {
            Self::Review
        } else {
            Self::Reject
        }
    }
}

/// Name points from the scrubbed key, its alphabetic base and its digits.
///
/// | rule                                  | points |
/// |---------------------------------------|--------|
/// | identical keys                        | 50     |
/// | same base, same digits                | 50     |
/// | same base, one digit run contains the other | 45 |
/// | same base, digits differ or missing   | 40     |
/// | one base contains the other, same digits | 40  |
/// | containment, overlapping digits       | 35     |
/// | containment otherwise                 | 25     |
/// | anything else                         | 0      |
pub fn name_points(well: &WeightedName, unit: &WeightedName) -> u32 {
    if well.is_empty() || unit.is_empty() {
        return 0;
    }
    if well.key == unit.key {
        return NAME_MAX;
    }
    if well.base.is_empty() || unit.base.is_empty() {
        return 0;
    }
    let same_digits = !well.digits.is_empty() && well.digits == unit.digits;
    let overlapping_digits = !well.digits.is_empty()
        && !unit.digits.is_empty()
        && (well.digits.contains(&unit.digits) || unit.digits.contains(&well.digits));
    if well.base == unit.base {
        match (same_digits, overlapping_digits) {
            (true, _) => 50,
            (false, true) => 45,
            (false, false) => 40,
        }
    } else if well.base.contains(&unit.base) || unit.base.contains(&well.base) {
        match (same_digits, overlapping_digits) {
            (true, _) => 40,
            (false, true) => 35,
            (false, false) => 25,
        }
    } else {
        0
    }
}

/// 40 / 25 / 10 / 0 for three / two / one / no matching TRS components.
pub fn trs_points(matching_components: usize) -> u32 {
    TRS_POINTS[matching_components.min(3)]
}

pub fn county_points(well_county: &str, unit_county: &str) -> u32 {
    if !well_county.is_empty() && well_county == unit_county {
        COUNTY_POINTS
    } else {
        0
    }
}

/// Scores one pair and records the breakdown.
pub fn score_pair(well: &WellView<'_>, unit: &UnitView<'_>) -> CompositeScore {
    let name = name_points(&well.weighted, &unit.weighted);
    let matching = well.trs.matching_components(&unit.trs);
    let trs = trs_points(matching);
    let county = county_points(&well.county, &unit.county);
    let explanation = vec![
        ScoreComponent {
            name: "Name",
            points: name,
            description: format!("'{}' vs '{}'", well.weighted.key, unit.weighted.key),
        },
        ScoreComponent {
            name: "TRS",
            points: trs,
            description: format!("{matching} of 3 components"),
        },
        ScoreComponent {
            name: "County",
            points: county,
            description: well.county.clone(),
        },
    ];
    CompositeScore {
        total: name + trs + county,
        explanation,
    }
}

/// Similarity of the scrubbed names, used only to break equal totals.
pub fn name_similarity(well: &WeightedName, unit: &WeightedName) -> f64 {
    jaro_winkler::similarity(well.key.chars(), unit.key.chars())
}

/// Orders two equally scored candidates by name similarity.
pub fn compare_similarity(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> WeightedName {
        WeightedName::from_raw(raw)
    }

    #[test]
    fn name_point_rules() {
        assert_eq!(name_points(&name("Smith Unit 1"), &name("SMITH 1")), 50);
        assert_eq!(name_points(&name("Smith 1-12"), &name("1-12 Smith")), 50);
        assert_eq!(name_points(&name("Smith 12"), &name("Smith 1")), 45);
        assert_eq!(name_points(&name("Smith 3"), &name("Smith")), 40);
        assert_eq!(name_points(&name("Smithson 3"), &name("Smith 3")), 40);
        assert_eq!(name_points(&name("Smithson 13"), &name("Smith 3")), 35);
        assert_eq!(name_points(&name("Smithson"), &name("Smith 3")), 25);
        assert_eq!(name_points(&name("Jones"), &name("Smith")), 0);
        assert_eq!(name_points(&name("12"), &name("12 A")), 0);
        assert_eq!(name_points(&name(""), &name("Smith")), 0);
    }

    #[test]
    fn trs_point_steps() {
        assert_eq!(trs_points(3), 40);
        assert_eq!(trs_points(2), 25);
        assert_eq!(trs_points(1), 10);
        assert_eq!(trs_points(0), 0);
    }

    #[test]
    fn verdict_thresholds_are_inclusive_for_review_only() {
        let config = WeightedConfig::default();
        assert_eq!(Verdict::classify(100, &config), Verdict::AutoLink);
        assert_eq!(Verdict::classify(91, &config), Verdict::AutoLink);
        assert_eq!(Verdict::classify(90, &config), Verdict::Review);
        assert_eq!(Verdict::classify(70, &config), Verdict::Review);
        assert_eq!(Verdict::classify(69, &config), Verdict::Reject);
        assert_eq!(Verdict::classify(0, &config), Verdict::Reject);
    }

    #[test]
    fn similarity_prefers_closer_names() {
        let well = name("Smith 1");
        let close = name("Smith 1 A");
        let far = name("Smithfield 1");
        assert_eq!(
            compare_similarity(name_similarity(&well, &close), name_similarity(&well, &far)),
            Ordering::Greater
        );
    }
}
