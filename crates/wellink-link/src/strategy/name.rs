use wellink_model::{MatchMethod, StrategyKind, StrategyStats};

use super::{LinkStrategy, MatchInput, Outcome, StrategyRun, resolve_by_trs};
use crate::config::NameMatchConfig;
use crate::error::LinkError;
use crate::index::{CandidateIndex, WellView};
use crate::ledger::LinkLedger;

/// County + lease name match in two passes: the normalized name first, then
/// the name with digits stripped for wells the first pass left unlinked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameStrategy {
    config: NameMatchConfig,
}

impl NameStrategy {
    pub fn new(config: NameMatchConfig) -> Self {
        Self { config }
    }

    fn evaluate(
        &self,
        well: &WellView<'_>,
        index: &CandidateIndex<'_>,
        stats: &mut StrategyStats,
    ) -> Result<Outcome, LinkError> {
        if well.county.is_empty() || (well.name_key.is_none() && well.alpha_key.is_none()) {
            return Ok(Outcome::Skipped);
        }

        let mut outcome = Outcome::NoMatch;
        if let Some(name) = &well.name_key {
            let candidates = index.by_county_name(&well.county, name);
            stats.candidates_examined += candidates.len();
            outcome = resolve_by_trs(
                well,
                index,
                candidates,
                self.config.max_candidates,
                MatchMethod::NameCounty,
                MatchMethod::NameCountyTrs,
            )?;
            if matches!(outcome, Outcome::Linked(_)) {
                return Ok(outcome);
            }
        }

        if let Some(alpha) = &well.alpha_key {
            let candidates = index.by_county_alpha(&well.county, alpha);
            stats.candidates_examined += candidates.len();
            let second = resolve_by_trs(
                well,
                index,
                candidates,
                self.config.max_candidates,
                MatchMethod::NameAlphaCounty,
                MatchMethod::NameAlphaCountyTrs,
            )?;
            // An empty second pass keeps the first pass's verdict.
            if second != Outcome::NoMatch {
                outcome = second;
            }
        }
        Ok(outcome)
    }
}

impl LinkStrategy for NameStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Name
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
