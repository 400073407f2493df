//! Per-strategy counters for operational visibility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{MatchMethod, StrategyKind};

/// Counters collected while a strategy runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStats {
    /// Wells (or tract-allocation units, for merge propagation) evaluated.
    pub examined: usize,
    /// Candidate units looked at across all probes.
    pub candidates_examined: usize,
    pub links_created: usize,
    /// Several candidates and the tie-break did not single one out.
    pub ambiguous: usize,
    /// Candidate set exceeded the strategy's fan-out limit.
    pub too_ambiguous: usize,
    pub no_match: usize,
    /// Inputs lacking the fields the strategy keys on (noise name, no operator, ...).
    pub skipped: usize,
    pub needs_review: usize,
    /// Evaluations that failed and were skipped.
    pub errors: usize,
    pub by_method: BTreeMap<MatchMethod, usize>,
}

impl StrategyStats {
    pub fn record_link(&mut self, method: MatchMethod, needs_review: bool) {
        self.links_created += 1;
        if needs_review {
            self.needs_review += 1;
        }
        *self.by_method.entry(method).or_insert(0) += 1;
    }

    /// Adds another set of counters into this one.
    pub fn absorb(&mut self, other: &StrategyStats) {
        self.examined += other.examined;
        self.candidates_examined += other.candidates_examined;
        self.links_created += other.links_created;
        self.ambiguous += other.ambiguous;
        self.too_ambiguous += other.too_ambiguous;
        self.no_match += other.no_match;
        self.skipped += other.skipped;
        self.needs_review += other.needs_review;
        self.errors += other.errors;
        for (method, count) in &other.by_method {
            *self.by_method.entry(*method).or_insert(0) += count;
        }
    }
}

/// Outcome of one strategy within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: StrategyKind,
    pub stats: StrategyStats,
    pub duration_ms: u128,
}

/// Summary of a whole linking run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub wells: usize,
    pub units: usize,
    pub existing_links: usize,
    pub reports: Vec<StrategyReport>,
}

impl RunSummary {
    /// Counters summed over every strategy that ran.
    pub fn totals(&self) -> StrategyStats {
        let mut totals = StrategyStats::default();
        for report in &self.reports {
            totals.absorb(&report.stats);
        }
        totals
    }

    pub fn proposed_links(&self) -> usize {
        self.reports.iter().map(|r| r.stats.links_created).sum()
    }
}
