use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::debug;
use wellink_model::{MatchMethod, PermitNumber, StrategyKind, StrategyStats};

use super::{LinkStrategy, MatchInput, Outcome, StrategyRun};
use crate::config::WeightedConfig;
use crate::error::LinkError;
use crate::index::{CandidateIndex, WellView};
use crate::ledger::{LinkLedger, Proposal};
use crate::score::{CompositeScore, Verdict, compare_similarity, name_similarity, score_pair};

/// Composite-score match against every unit in the well's county.
///
/// With a target set only those permits are scored.
#[derive(Debug, Clone, Default)]
pub struct WeightedStrategy {
    config: WeightedConfig,
    targets: Option<BTreeSet<PermitNumber>>,
}

/// Best candidate so far; similarity is computed only when a tie needs it.
struct Best {
    position: usize,
    score: CompositeScore,
    similarity: Option<f64>,
}

impl Best {
    fn similarity(&mut self, well: &WellView<'_>, index: &CandidateIndex<'_>) -> f64 {
        *self.similarity.get_or_insert_with(|| {
            name_similarity(&well.weighted, &index.unit(self.position).weighted)
        })
    }
}

impl WeightedStrategy {
    pub fn new(config: WeightedConfig) -> Self {
        Self {
            config,
            targets: None,
        }
    }

    #[must_use]
    pub fn with_targets(mut self, targets: BTreeSet<PermitNumber>) -> Self {
        self.targets = Some(targets);
        self
    }

    fn is_targeted(&self, permit: &PermitNumber) -> bool {
        self.targets
            .as_ref()
            .is_none_or(|targets| targets.contains(permit))
    }

    fn evaluate(
        &self,
        well: &WellView<'_>,
        index: &CandidateIndex<'_>,
        stats: &mut StrategyStats,
    ) -> Result<Outcome, LinkError> {
        if well.county.is_empty() || well.weighted.is_empty() {
            return Ok(Outcome::Skipped);
        }
        let permit = &well.well.permit_number;
        let candidates = index.by_county(&well.county);
        stats.candidates_examined += candidates.len();

        let mut best: Option<Best> = None;
        for &position in candidates {
            let score = score_pair(well, index.unit(position));
            if score.total > 100 {
                return Err(LinkError::ScoreOverflow {
                    permit_number: permit.to_string(),
                    total: score.total,
                });
            }
            best = Some(match best {
                None => Best {
                    position,
                    score,
                    similarity: None,
                },
                Some(mut current) => match score.total.cmp(&current.score.total) {
                    Ordering::Greater => Best {
                        position,
                        score,
                        similarity: None,
                    },
                    Ordering::Less => current,
                    Ordering::Equal => {
                        let incumbent = current.similarity(well, index);
                        let challenger =
                            name_similarity(&well.weighted, &index.unit(position).weighted);
                        if compare_similarity(challenger, incumbent) == Ordering::Greater {
                            Best {
                                position,
                                score,
                                similarity: Some(challenger),
                            }
                        } else {
                            current
                        }
                    }
                },
            });
        }

        let Some(best) = best else {
            return Ok(Outcome::NoMatch);
        };
        let unit = index.unit(best.position).unit;
        debug!(
            permit_number = %permit,
            unit_number = %unit.unit_number,
            total = best.score.total,
            explanation = %best.score.explain(),
            "best weighted candidate"
        );
        let method = match Verdict::classify(best.score.total, &self.config) {
            Verdict::AutoLink => MatchMethod::WeightedAuto,
            Verdict::Review => MatchMethod::WeightedReview,
            Verdict::Reject => return Ok(Outcome::NoMatch),
        };
        let proposal = Proposal::scored(
            permit,
            &unit.unit_number,
            &unit.lease_name,
            method,
            best.score.confidence(),
        )?;
        Ok(Outcome::Linked(vec![proposal]))
    }
}

impl LinkStrategy for WeightedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weighted
    }

    fn execute(&self, input: &MatchInput<'_>, ledger: &LinkLedger) -> StrategyRun {
        let mut run = StrategyRun::default();
        for well in input
            .unlinked(ledger)
            .filter(|well| self.is_targeted(&well.well.permit_number))
        {
            run.stats.examined += 1;
            let outcome = self.evaluate(well, input.index, &mut run.stats);
            run.absorb(well.well.permit_number.as_str(), outcome);
        }
        run
    }
}
