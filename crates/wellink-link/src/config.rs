//! Tunables for a linking run.
//!
//! Every section has serde defaults, so a settings file only needs the keys
//! it changes.

use serde::{Deserialize, Serialize};
use wellink_model::StrategyKind;

/// Largest batch handed to a sink in one call.
pub const MAX_BATCH_SIZE: usize = 500;

/// Top-level configuration for [`LinkEngine`](crate::LinkEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Strategies to run, in order.
    pub strategies: Vec<StrategyKind>,
    pub name_match: NameMatchConfig,
    pub operator: OperatorConfig,
    pub weighted: WeightedConfig,
    pub emit: EmitConfig,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            strategies: StrategyKind::ALL.to_vec(),
            name_match: NameMatchConfig::default(),
            operator: OperatorConfig::default(),
            weighted: WeightedConfig::default(),
            emit: EmitConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameMatchConfig {
    /// Candidate sets larger than this are too ambiguous to tie-break (default: 10).
    pub max_candidates: usize,
}

impl Default for NameMatchConfig {
    fn default() -> Self {
        Self { max_candidates: 10 }
    }
}

/// What to do when two operator+TRS candidates survive the well-type tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiCandidatePolicy {
    /// Link the well to both units and flag the links for review.
    #[default]
    LinkAll,
    /// Leave the well unlinked and count it as ambiguous.
    Defer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatorConfig {
    pub multi_candidate_policy: MultiCandidatePolicy,
}

/// Thresholds on the 0-100 composite score.
///
/// - Above `auto_link_above`: linked without review
/// - `review_at_least` up to and including `auto_link_above`: linked, flagged for review
/// - Below `review_at_least`: rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightedConfig {
    /// Default: 90.
    pub auto_link_above: u32,
    /// Default: 70.
    pub review_at_least: u32,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            auto_link_above: 90,
            review_at_least: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Links per sink call, clamped to `1..=MAX_BATCH_SIZE`.
    pub batch_size: usize,
    /// Attempts per batch before emission gives up (at least one).
    pub max_attempts: usize,
    /// Prefix of the provenance tag, completed with the strategy name.
    pub provenance: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            max_attempts: 3,
            provenance: "wellink".to_string(),
        }
    }
}

impl EmitConfig {
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }

    pub fn effective_max_attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    /// Provenance tag for links created by `strategy`.
    pub fn provenance_for(&self, strategy: StrategyKind) -> String {
        format!("{}:{}", self.provenance, strategy.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_is_clamped() {
        let mut emit = EmitConfig::default();
        assert_eq!(emit.effective_batch_size(), 500);
        emit.batch_size = 0;
        assert_eq!(emit.effective_batch_size(), 1);
        emit.batch_size = 10_000;
        assert_eq!(emit.effective_batch_size(), MAX_BATCH_SIZE);
    }

    #[test]
    fn provenance_names_strategy() {
        let emit = EmitConfig::default();
        assert_eq!(
            emit.provenance_for(StrategyKind::OperatorTrs),
            "wellink:operator-trs"
        );
    }
}
