//! Library half of the `wellink` binary: logging setup, configuration
//! loading, file sinks and the run pipeline.

#![deny(unsafe_code)]

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod sink;
