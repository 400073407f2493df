use std::collections::{BTreeMap, BTreeSet};

use wellink_model::{BaseKey, LinkKey, MatchMethod, PermitNumber, StrategyKind, StrategyStats};

use super::{LinkStrategy, MatchInput, Outcome, StrategyRun};
use crate::error::LinkError;
use crate::index::UnitView;
use crate::ledger::{LinkLedger, Proposal};

/// Copies links across tract allocations of one lease.
///
/// A well linked to any allocation of a lease (existing or earlier in the
/// run) is proposed for every tract allocation of the same base key.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeAllocationStrategy;

impl LinkStrategy for MergeAllocationStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MergeAllocation
    }

    fn execute(&self, input: &MatchInput<'_>, ledger: &LinkLedger) -> StrategyRun {
        let seeds = input.index.by_base_key(ledger);
        let mut run = StrategyRun::default();
        for unit in input.index.units().filter(|view| view.unit.is_tract_allocation()) {
            run.stats.examined += 1;
            let outcome = propagate(unit, &seeds, ledger, &mut run.stats);
            run.absorb(unit.unit.unit_number.as_str(), outcome);
        }
        run
    }
}

fn propagate(
    unit: &UnitView<'_>,
    seeds: &BTreeMap<BaseKey, Vec<&LinkKey>>,
    ledger: &LinkLedger,
    stats: &mut StrategyStats,
) -> Result<Outcome, LinkError> {
    let Some(linked) = seeds.get(&unit.unit.base_key) else {
        return Ok(Outcome::NoMatch);
    };
    let wells: BTreeSet<&PermitNumber> = linked
        .iter()
        .filter(|key| key.unit_number != unit.unit.unit_number)
        .map(|key| &key.permit_number)
        .collect();
    stats.candidates_examined += wells.len();
    if wells.is_empty() {
        return Ok(Outcome::NoMatch);
    }
    let mut proposals = Vec::new();
    for permit in wells {
        let key = LinkKey::new(permit.clone(), unit.unit.unit_number.clone());
        if ledger.contains(&key) {
            continue;
        }
        proposals.push(Proposal::fixed(permit, unit.unit, MatchMethod::MergeAllocation)?);
    }
    if proposals.is_empty() {
        return Ok(Outcome::NoMatch);
    }
    Ok(Outcome::Linked(proposals))
}
