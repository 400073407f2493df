//! Well / production-unit linking engine.
//!
//! Builds a candidate index over the unit collection, runs the merge-allocation,
//! name, operator+TRS and weighted strategies against a shared ledger of linked
//! pairs, and emits the resulting links in bounded batches.
//!
//! # Example
//!
//! ```
//! use wellink_link::{CollectSink, LinkConfig, LinkEmitter, LinkEngine};
//! use wellink_model::{PermitNumber, ProductionUnit, UnitNumber, Well};
//!
//! let wells = vec![
//!     Well::new(PermitNumber::new("35049-1").unwrap(), "Jones 2-10")
//!         .with_location("Garvin", "10", "2N", "3W"),
//! ];
//! let units = vec![
//!     ProductionUnit::new(UnitNumber::new("049-000100-1-0000").unwrap(), "JONES")
//!         .with_location("Garvin", "10", "2N", "3W"),
//! ];
//!
//! let engine = LinkEngine::new(LinkConfig::default());
//! let run = engine.run(&wells, &units, &[]);
//! assert_eq!(run.links.len(), 1);
//!
//! let mut sink = CollectSink::default();
//! LinkEmitter::new(&engine.config().emit)
//!     .emit(&run.links, &mut sink)
//!     .unwrap();
//! assert_eq!(sink.batches.len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod emit;
pub mod engine;
pub mod error;
pub mod index;
pub mod ledger;
pub mod score;
pub mod strategy;

pub use config::{
    EmitConfig, LinkConfig, MAX_BATCH_SIZE, MultiCandidatePolicy, NameMatchConfig,
    OperatorConfig, WeightedConfig,
};
pub use emit::{CollectSink, EmitReport, LinkBatch, LinkEmitter, LinkSink};
pub use engine::{LinkEngine, LinkRun};
pub use error::{EmitError, LinkError, SinkError};
pub use index::{CandidateIndex, UnitView, WellView};
pub use ledger::{LinkLedger, Proposal};
pub use score::{CompositeScore, ScoreComponent, Verdict, score_pair};
pub use strategy::{
    LinkStrategy, MatchInput, MergeAllocationStrategy, NameStrategy, OperatorTrsStrategy,
    StrategyRun, WeightedStrategy,
};
