use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceTier, LinkStatus, MatchMethod};
use crate::error::ModelError;
use crate::ids::{PermitNumber, UnitNumber};

/// Identity of a (well, unit) pair. A pair is linked at most once.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    pub permit_number: PermitNumber,
    pub unit_number: UnitNumber,
}

impl LinkKey {
    pub fn new(permit_number: PermitNumber, unit_number: UnitNumber) -> Self {
        Self {
            permit_number,
            unit_number,
        }
    }
}

/// A proposed association between one well and one production unit.
///
/// Created by a strategy and never mutated afterwards; status transitions
/// belong to an external reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub permit_number: PermitNumber,
    pub unit_number: UnitNumber,
    pub method: MatchMethod,
    pub tier: ConfidenceTier,
    /// Confidence score (0.0 to 1.0), strategy specific.
    pub score: f64,
    /// Lease name at link time, kept for audit.
    pub lease_name: String,
    pub provenance: String,
    pub status: LinkStatus,
    pub needs_review: bool,
}

impl Link {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.permit_number.clone(), self.unit_number.clone())
    }
}

/// Checks that a score is finite and inside `0.0..=1.0`.
pub fn validate_score(score: f64) -> Result<f64, ModelError> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(ModelError::ScoreOutOfRange(score))
    }
}
