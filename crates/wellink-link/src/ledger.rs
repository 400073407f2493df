//! Pair bookkeeping shared by every strategy in a run.

use std::collections::BTreeSet;

use wellink_model::{
    Link, LinkKey, LinkStatus, MatchMethod, PermitNumber, ProductionUnit, UnitNumber,
    validate_score,
};

use crate::error::LinkError;

/// A candidate link produced by a strategy, before deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub key: LinkKey,
    pub lease_name: String,
    pub method: MatchMethod,
    pub score: f64,
}

impl Proposal {
    /// Proposal scored with the method's fixed score.
    pub fn fixed(
        permit_number: &PermitNumber,
        unit: &ProductionUnit,
        method: MatchMethod,
    ) -> Result<Self, LinkError> {
        let score = method
            .fixed_score()
            .ok_or(LinkError::MissingScore { method })?;
        Self::scored(permit_number, &unit.unit_number, &unit.lease_name, method, score)
    }

    /// Proposal with an explicit score, validated to `0.0..=1.0`.
    pub fn scored(
        permit_number: &PermitNumber,
        unit_number: &UnitNumber,
        lease_name: &str,
        method: MatchMethod,
        score: f64,
    ) -> Result<Self, LinkError> {
        Ok(Self {
            key: LinkKey::new(permit_number.clone(), unit_number.clone()),
            lease_name: lease_name.to_string(),
            method,
            score: validate_score(score)?,
        })
    }

    pub fn needs_review(&self) -> bool {
        self.method.needs_review()
    }
}

/// Every (well, unit) pair linked so far: existing links plus this run's proposals.
///
/// A pair is accepted at most once, which makes repeated runs over the same
/// input idempotent.
#[derive(Debug, Clone, Default)]
pub struct LinkLedger {
    pairs: BTreeSet<LinkKey>,
    linked_wells: BTreeSet<PermitNumber>,
    existing: usize,
    created: Vec<Link>,
}

impl LinkLedger {
    pub fn from_existing<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = LinkKey>,
    {
        let mut ledger = Self::default();
        for key in existing {
            ledger.linked_wells.insert(key.permit_number.clone());
            if ledger.pairs.insert(key) {
                ledger.existing += 1;
            }
        }
        ledger
    }

    pub fn contains(&self, key: &LinkKey) -> bool {
        self.pairs.contains(key)
    }

    /// True once the well has any link, existing or created.
    pub fn is_well_linked(&self, permit_number: &PermitNumber) -> bool {
        self.linked_wells.contains(permit_number)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &LinkKey> {
        self.pairs.iter()
    }

    /// Distinct pairs that were linked before the run.
    pub fn existing_count(&self) -> usize {
        self.existing
    }

    /// Turns a proposal into a link unless its pair is already known.
    pub fn accept(&mut self, proposal: Proposal, provenance: &str) -> Option<&Link> {
        if self.pairs.contains(&proposal.key) {
            return None;
        }
        self.pairs.insert(proposal.key.clone());
        self.linked_wells.insert(proposal.key.permit_number.clone());
        let needs_review = proposal.needs_review();
        let Proposal {
            key,
            lease_name,
            method,
            score,
        } = proposal;
        self.created.push(Link {
            permit_number: key.permit_number,
            unit_number: key.unit_number,
            method,
            tier: method.tier(),
            score,
            lease_name,
            provenance: provenance.to_string(),
            status: LinkStatus::Proposed,
            needs_review,
        });
        self.created.last()
    }

    /// Links created during this run, in acceptance order.
    pub fn created(&self) -> &[Link] {
        &self.created
    }

    pub fn into_created(self) -> Vec<Link> {
        self.created
    }
}
