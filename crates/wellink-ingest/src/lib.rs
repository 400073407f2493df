//! CSV ingestion of the well, production-unit and existing-link registries.
//!
//! Loading is tolerant: rows without an identity or that fail to parse are
//! logged and counted, and duplicate identities keep the first row. Only a
//! missing file, an unreadable file or a missing identity column is an error.

#![deny(unsafe_code)]

pub mod error;
pub mod registry;

pub use error::{IngestError, Result};
pub use registry::{
    IngestReport, Loaded, read_links, read_links_from, read_targets, read_targets_from,
    read_units, read_units_from, read_wells, read_wells_from,
};
