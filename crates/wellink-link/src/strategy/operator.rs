use wellink_model::{MatchMethod, StrategyKind, StrategyStats};

use super::{LinkStrategy, MatchInput, Outcome, StrategyRun};
use crate::config::{MultiCandidatePolicy, OperatorConfig};
use crate::error::LinkError;
use crate::index::{CandidateIndex, WellView};
use crate::ledger::{LinkLedger, Proposal};

/// Operator + section/township/range match.
///
/// Two candidates are separated by comparing the well type with the unit
/// classification; three or more are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorTrsStrategy {
    config: OperatorConfig,
}

impl OperatorTrsStrategy {
    pub fn new(config: OperatorConfig) -> Self {
        Self { config }
    }

    fn evaluate(
        &self,
        well: &WellView<'_>,
        index: &CandidateIndex<'_>,
        stats: &mut StrategyStats,
    ) -> Result<Outcome, LinkError> {
        if well.operator.is_empty() || !well.trs.is_complete() {
            return Ok(Outcome::Skipped);
        }
        let permit = &well.well.permit_number;
        let candidates = index.by_operator_trs(&well.operator, &well.trs);
        stats.candidates_examined += candidates.len();

        match candidates {
            [] => Ok(Outcome::NoMatch),
            [only] => Ok(Outcome::Linked(vec![Proposal::fixed(
                permit,
                index.unit(*only).unit,
                MatchMethod::OperatorTrs,
            )?])),
            [first, second] => {
                let pair = [index.unit(*first), index.unit(*second)];
                let expected = well.well.well_type.expected_class();
                let matching: Vec<_> = pair
                    .iter()
                    .filter(|unit| Some(unit.unit.classification) == expected)
                    .collect();
                if let [only] = matching.as_slice() {
                    return Ok(Outcome::Linked(vec![Proposal::fixed(
                        permit,
                        only.unit,
                        MatchMethod::OperatorTrsWellType,
                    )?]));
                }
                match self.config.multi_candidate_policy {
                    MultiCandidatePolicy::LinkAll => {
                        let proposals = pair
                            .iter()
                            .map(|unit| {
                                Proposal::fixed(permit, unit.unit, MatchMethod::OperatorTrsMulti)
                            })
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(Outcome::Linked(proposals))
                    }
                    MultiCandidatePolicy::Defer => Ok(Outcome::Ambiguous),
                }
            }
            _ => Ok(Outcome::TooAmbiguous),
        }
    }
}

impl LinkStrategy for OperatorTrsStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::OperatorTrs
    }

    fn execute(&self, input: &MatchInput<'_>, ledger: &LinkLedger) -> StrategyRun {
        let mut run = StrategyRun::default();
        for well in input.unlinked(ledger) {
            run.stats.examined += 1;
            let outcome = self.evaluate(well, input.index, &mut run.stats);
            run.absorb(well.well.permit_number.as_str(), outcome);
        }
        run
    }
}
