//! Tag vocabularies shared by the registries and the linking strategies.
//!
//! Upstream registries spell well types and unit classifications in many ways
//! ("OIL", "O", "SWD", "Salt Water Disposal", ...). Parsing is lenient and
//! never fails: anything unrecognised becomes `Other`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Well type as recorded on the drilling permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellType {
    Oil,
    Gas,
    /// Injection and disposal wells of any flavour.
    Injection,
    #[default]
    Other,
}

impl WellType {
    /// Classify a free-text well type tag.
    pub fn from_tag(raw: &str) -> Self {
        match classify_tag(raw) {
            TagClass::Oil => Self::Oil,
            TagClass::Gas => Self::Gas,
            TagClass::Injection => Self::Injection,
            TagClass::Other => Self::Other,
        }
    }

    /// The unit classification a well of this type is expected to report under.
    pub fn expected_class(&self) -> Option<UnitClass> {
        match self {
            Self::Oil => Some(UnitClass::Oil),
            Self::Gas => Some(UnitClass::Gas),
            Self::Injection => Some(UnitClass::Injection),
            Self::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Gas => "gas",
            Self::Injection => "injection",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for WellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Production unit classification on the tax side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitClass {
    Oil,
    Gas,
    Injection,
    #[default]
    Other,
}

impl UnitClass {
    /// Classify a free-text unit classification tag.
    pub fn from_tag(raw: &str) -> Self {
        match classify_tag(raw) {
            TagClass::Oil => Self::Oil,
            TagClass::Gas => Self::Gas,
            TagClass::Injection => Self::Injection,
            TagClass::Other => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Gas => "gas",
            Self::Injection => "injection",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum TagClass {
    Oil,
    Gas,
    Injection,
    Other,
}

fn classify_tag(raw: &str) -> TagClass {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return TagClass::Other;
    }
    let injection = normalized.contains("INJ")
        || normalized.contains("DISP")
        || matches!(normalized.as_str(), "I" | "C" | "SWD" | "WIW" | "WDW" | "2D" | "2R");
    if injection {
        return TagClass::Injection;
    }
    let oil = normalized.contains("OIL") || matches!(normalized.as_str(), "O" | "A");
    let gas = normalized.contains("GAS") || matches!(normalized.as_str(), "G" | "B");
    match (oil, gas) {
        (true, false) => TagClass::Oil,
        (false, true) => TagClass::Gas,
        _ => TagClass::Other,
    }
}

/// Ordinal confidence bucket for a link, distinct from the numeric score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of a link. The engine only ever creates `Proposed` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    #[default]
    Proposed,
    Confirmed,
    Rejected,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }
}

/// The four linking strategies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    MergeAllocation,
    Name,
    OperatorTrs,
    Weighted,
}

impl StrategyKind {
    /// Default execution order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::MergeAllocation,
        StrategyKind::Name,
        StrategyKind::OperatorTrs,
        StrategyKind::Weighted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MergeAllocation => "merge-allocation",
            Self::Name => "name",
            Self::OperatorTrs => "operator-trs",
            Self::Weighted => "weighted",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MergeAllocation => "Propagate links across tract allocations of one lease",
            Self::Name => "County + normalized lease name, exact then digit-stripped",
            Self::OperatorTrs => "Operator + section/township/range with well-type tie-break",
            Self::Weighted => "Composite name/TRS/county score for targeted wells",
        }
    }

    /// Method tags this strategy may emit.
    pub fn methods(&self) -> &'static [MatchMethod] {
        match self {
            Self::MergeAllocation => &[MatchMethod::MergeAllocation],
            Self::Name => &[
                MatchMethod::NameCounty,
                MatchMethod::NameCountyTrs,
                MatchMethod::NameAlphaCounty,
                MatchMethod::NameAlphaCountyTrs,
            ],
            Self::OperatorTrs => &[
                MatchMethod::OperatorTrs,
                MatchMethod::OperatorTrsWellType,
                MatchMethod::OperatorTrsMulti,
            ],
            Self::Weighted => &[MatchMethod::WeightedAuto, MatchMethod::WeightedReview],
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "merge" | "merge-allocation" => Ok(Self::MergeAllocation),
            "name" => Ok(Self::Name),
            "operator" | "operator-trs" => Ok(Self::OperatorTrs),
            "weighted" => Ok(Self::Weighted),
            _ => Err(format!("Unknown strategy: {s}")),
        }
    }
}

/// Tag identifying which rule produced a link.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    MergeAllocation,
    NameCounty,
    NameCountyTrs,
    NameAlphaCounty,
    NameAlphaCountyTrs,
    OperatorTrs,
    #[serde(rename = "operator-trs-welltype")]
    OperatorTrsWellType,
    OperatorTrsMulti,
    WeightedAuto,
    WeightedReview,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MergeAllocation => "merge-allocation",
            Self::NameCounty => "name-county",
            Self::NameCountyTrs => "name-county-trs",
            Self::NameAlphaCounty => "name-alpha-county",
            Self::NameAlphaCountyTrs => "name-alpha-county-trs",
            Self::OperatorTrs => "operator-trs",
            Self::OperatorTrsWellType => "operator-trs-welltype",
            Self::OperatorTrsMulti => "operator-trs-multi",
            Self::WeightedAuto => "weighted-auto",
            Self::WeightedReview => "weighted-review",
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        match self {
            Self::MergeAllocation => StrategyKind::MergeAllocation,
            Self::NameCounty
            | Self::NameCountyTrs
            | Self::NameAlphaCounty
            | Self::NameAlphaCountyTrs => StrategyKind::Name,
            Self::OperatorTrs | Self::OperatorTrsWellType | Self::OperatorTrsMulti => {
                StrategyKind::OperatorTrs
            }
            Self::WeightedAuto | Self::WeightedReview => StrategyKind::Weighted,
        }
    }

    pub fn tier(&self) -> ConfidenceTier {
        match self {
            Self::MergeAllocation
            | Self::NameCountyTrs
            | Self::NameAlphaCountyTrs
            | Self::OperatorTrs
            | Self::WeightedAuto => ConfidenceTier::High,
            Self::NameCounty
            | Self::NameAlphaCounty
            | Self::OperatorTrsWellType
            | Self::OperatorTrsMulti
            | Self::WeightedReview => ConfidenceTier::Medium,
        }
    }

    /// Fixed score for the method. Weighted methods derive theirs from the total.
    pub fn fixed_score(&self) -> Option<f64> {
        match self {
            Self::MergeAllocation => Some(0.90),
            Self::NameCounty => Some(0.70),
            Self::NameCountyTrs => Some(0.85),
            Self::NameAlphaCounty => Some(0.65),
            Self::NameAlphaCountyTrs => Some(0.80),
            Self::OperatorTrs => Some(0.90),
            Self::OperatorTrsWellType => Some(0.80),
            Self::OperatorTrsMulti => Some(0.65),
            Self::WeightedAuto | Self::WeightedReview => None,
        }
    }

    /// Links from these methods are surfaced for manual review.
    pub fn needs_review(&self) -> bool {
        matches!(self, Self::OperatorTrsMulti | Self::WeightedReview)
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
