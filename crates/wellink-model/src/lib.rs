//! Domain model for linking drilling-permit wells to tax-reporting production units.
//!
//! The two registries share no primary key. Everything here is plain data:
//! identifiers, classification tags, the link record and run statistics.

#![deny(unsafe_code)]

pub mod entity;
pub mod enums;
pub mod error;
pub mod ids;
pub mod link;
pub mod stats;

pub use entity::{ProductionUnit, Well};
pub use enums::{ConfidenceTier, LinkStatus, MatchMethod, StrategyKind, UnitClass, WellType};
pub use error::{ModelError, Result};
pub use ids::{BaseKey, PermitNumber, UnitNumber};
pub use link::{Link, LinkKey, validate_score};
pub use stats::{RunSummary, StrategyReport, StrategyStats};
