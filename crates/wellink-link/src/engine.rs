//! Linking engine: runs the configured strategies over one snapshot of
//! wells, units and existing links.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{info, info_span};
use wellink_model::{
    Link, LinkKey, PermitNumber, ProductionUnit, RunSummary, StrategyKind, StrategyReport, Well,
};

use crate::config::LinkConfig;
use crate::index::CandidateIndex;
use crate::ledger::LinkLedger;
use crate::strategy::{
    LinkStrategy, MatchInput, MergeAllocationStrategy, NameStrategy, OperatorTrsStrategy,
    WeightedStrategy,
};

/// Links created by a run plus its statistics.
#[derive(Debug, Clone, Default)]
pub struct LinkRun {
    /// New links in creation order (strategy order, then input order).
    pub links: Vec<Link>,
    pub summary: RunSummary,
}

/// Runs strategies in order against a shared ledger.
#[derive(Debug, Clone, Default)]
pub struct LinkEngine {
    config: LinkConfig,
    targets: Option<BTreeSet<PermitNumber>>,
}

impl LinkEngine {
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            targets: None,
        }
    }

    /// Restricts the weighted strategy to these permits.
    #[must_use]
    pub fn with_targets(mut self, targets: BTreeSet<PermitNumber>) -> Self {
        self.targets = Some(targets);
        self
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Builds the strategy for `kind` from the engine's configuration.
    pub fn strategy(&self, kind: StrategyKind) -> Box<dyn LinkStrategy> {
        match kind {
            StrategyKind::MergeAllocation => Box::new(MergeAllocationStrategy),
            StrategyKind::Name => Box::new(NameStrategy::new(self.config.name_match)),
            StrategyKind::OperatorTrs => Box::new(OperatorTrsStrategy::new(self.config.operator)),
            StrategyKind::Weighted => {
                let strategy = WeightedStrategy::new(self.config.weighted);
                match &self.targets {
                    Some(targets) => Box::new(strategy.with_targets(targets.clone())),
                    None => Box::new(strategy),
                }
            }
        }
    }

    /// Runs the configured strategies.
    pub fn run(&self, wells: &[Well], units: &[ProductionUnit], existing: &[LinkKey]) -> LinkRun {
        self.run_strategies(wells, units, existing, &self.config.strategies)
    }

    /// Runs `kinds` in the given order. Later strategies see the links made
    /// by earlier ones, and no pair is ever linked twice.
    pub fn run_strategies(
        &self,
        wells: &[Well],
        units: &[ProductionUnit],
        existing: &[LinkKey],
        kinds: &[StrategyKind],
    ) -> LinkRun {
        let span = info_span!(
            "link_run",
            wells = wells.len(),
            units = units.len(),
            existing_links = existing.len()
        );
        let _guard = span.enter();

        let index = CandidateIndex::build(units);
        let input = MatchInput::new(wells, &index);
        let mut ledger = LinkLedger::from_existing(existing.iter().cloned());
        let mut summary = RunSummary {
            wells: wells.len(),
            units: units.len(),
            existing_links: ledger.existing_count(),
            reports: Vec::with_capacity(kinds.len()),
        };

        for &kind in kinds {
            let strategy = self.strategy(kind);
            let report = run_one(strategy.as_ref(), &input, &mut ledger, &self.config);
            summary.reports.push(report);
        }

        let links = ledger.into_created();
        info!(
            links = links.len(),
            needs_review = links.iter().filter(|link| link.needs_review).count(),
            "link run complete"
        );
        LinkRun { links, summary }
    }
}

fn run_one(
    strategy: &dyn LinkStrategy,
    input: &MatchInput<'_>,
    ledger: &mut LinkLedger,
    config: &LinkConfig,
) -> StrategyReport {
    let kind = strategy.kind();
    let span = info_span!("strategy", strategy = %kind);
    let _guard = span.enter();
    let start = Instant::now();

    let run = strategy.execute(input, ledger);
    let provenance = config.emit.provenance_for(kind);
    let mut stats = run.stats;
    let mut duplicates = 0usize;
    for proposal in run.proposals {
        let method = proposal.method;
        match ledger.accept(proposal, &provenance) {
            Some(link) => stats.record_link(method, link.needs_review),
            None => duplicates += 1,
        }
    }

    let duration_ms = start.elapsed().as_millis();
    info!(
        strategy = %kind,
        examined = stats.examined,
        candidates = stats.candidates_examined,
        links = stats.links_created,
        ambiguous = stats.ambiguous,
        too_ambiguous = stats.too_ambiguous,
        no_match = stats.no_match,
        skipped = stats.skipped,
        needs_review = stats.needs_review,
        errors = stats.errors,
        duplicates,
        duration_ms,
        "strategy complete"
    );
    StrategyReport {
        strategy: kind,
        stats,
        duration_ms,
    }
}
