//! The four linking strategies behind one trait.
//!
//! A strategy reads the wells, the candidate index and the ledger, and
//! returns proposals plus counters. It never writes to the ledger; the engine
//! accepts proposals between strategies so each one sees the links made by
//! the strategies before it.

mod merge;
mod name;
mod operator;
mod weighted;

pub use merge::MergeAllocationStrategy;
pub use name::NameStrategy;
pub use operator::OperatorTrsStrategy;
pub use weighted::WeightedStrategy;

use tracing::{debug, warn};
use wellink_model::{MatchMethod, PermitNumber, StrategyKind, StrategyStats, Well};

use crate::error::LinkError;
use crate::index::{CandidateIndex, WellView};
use crate::ledger::{LinkLedger, Proposal};

/// Wells with their keys computed, plus the index over units.
#[derive(Debug)]
pub struct MatchInput<'a> {
    pub wells: Vec<WellView<'a>>,
    pub index: &'a CandidateIndex<'a>,
}

impl<'a> MatchInput<'a> {
    pub fn new(wells: &'a [Well], index: &'a CandidateIndex<'a>) -> Self {
        Self {
            wells: wells.iter().map(WellView::new).collect(),
            index,
        }
    }

    /// Wells without any link in the ledger.
    pub fn unlinked<'s>(
        &'s self,
        ledger: &'s LinkLedger,
    ) -> impl Iterator<Item = &'s WellView<'a>> + 's {
        self.wells
            .iter()
            .filter(move |well| !ledger.is_well_linked(&well.well.permit_number))
    }
}

/// What a strategy produced in one pass.
#[derive(Debug, Clone, Default)]
pub struct StrategyRun {
    pub proposals: Vec<Proposal>,
    /// Counters except `links_created`, which the engine fills in on acceptance.
    pub stats: StrategyStats,
}

/// A linking strategy.
pub trait LinkStrategy {
    fn kind(&self) -> StrategyKind;

    fn execute(&self, input: &MatchInput<'_>, ledger: &LinkLedger) -> StrategyRun;
}

/// Result of evaluating one well (or, for merge propagation, one unit).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    Linked(Vec<Proposal>),
    NoMatch,
    Ambiguous,
    TooAmbiguous,
    Skipped,
}

impl StrategyRun {
    /// Folds one evaluation into the run. Errors are counted and skipped.
    pub(crate) fn absorb(&mut self, subject: &str, result: Result<Outcome, LinkError>) {
        match result {
            Ok(Outcome::Linked(proposals)) => {
                for proposal in &proposals {
                    debug!(
                        subject,
                        unit_number = %proposal.key.unit_number,
                        method = %proposal.method,
                        score = proposal.score,
                        "proposed link"
                    );
                }
                self.proposals.extend(proposals);
            }
            Ok(Outcome::NoMatch) => self.stats.no_match += 1,
            Ok(Outcome::Ambiguous) => {
                debug!(subject, "ambiguous candidates");
                self.stats.ambiguous += 1;
            }
            Ok(Outcome::TooAmbiguous) => {
                debug!(subject, "too many candidates");
                self.stats.too_ambiguous += 1;
            }
            Ok(Outcome::Skipped) => self.stats.skipped += 1,
            Err(err) => {
                warn!(subject, error = %err, "evaluation failed, skipping");
                self.stats.errors += 1;
            }
        }
    }
}

/// Resolves a name-keyed candidate set.
///
/// One candidate links with `plain`, or with `with_trs` when its TRS equals
/// the well's complete TRS. Up to `max_candidates` candidates are narrowed to
/// those whose TRS equals the well's; a single survivor links with
/// `with_trs`.
pub(crate) fn resolve_by_trs(
    well: &WellView<'_>,
    index: &CandidateIndex<'_>,
    candidates: &[usize],
    max_candidates: usize,
    plain: MatchMethod,
    with_trs: MatchMethod,
) -> Result<Outcome, LinkError> {
    let permit: &PermitNumber = &well.well.permit_number;
    match candidates {
        [] => Ok(Outcome::NoMatch),
        [only] => {
            let unit = index.unit(*only);
            let method = if well.trs.matches_exactly(&unit.trs) {
                with_trs
            } else {
                plain
            };
            Ok(Outcome::Linked(vec![Proposal::fixed(permit, unit.unit, method)?]))
        }
        _ if candidates.len() <= max_candidates => {
            let survivors: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&position| well.trs.matches_exactly(&index.unit(position).trs))
                .collect();
            match survivors.as_slice() {
                [only] => Ok(Outcome::Linked(vec![Proposal::fixed(
                    permit,
                    index.unit(*only).unit,
                    with_trs,
                )?])),
                _ => Ok(Outcome::Ambiguous),
            }
        }
        _ => Ok(Outcome::TooAmbiguous),
    }
}
