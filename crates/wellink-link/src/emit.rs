//! Batched delivery of created links to a sink.

use tracing::{debug, warn};
use wellink_model::Link;

use crate::config::EmitConfig;
use crate::error::{EmitError, SinkError};

/// One bounded slice of links handed to a sink.
#[derive(Debug, Clone, Copy)]
pub struct LinkBatch<'a> {
    /// Zero-based position of the batch within the emission.
    pub index: usize,
    pub links: &'a [Link],
}

/// Destination for created links.
///
/// A batch is applied as a whole or not at all; a failed batch may be
/// retried, so sinks must tolerate seeing the same batch again.
pub trait LinkSink {
    fn emit_batch(&mut self, batch: &LinkBatch<'_>) -> Result<(), SinkError>;

    /// Called once after the last batch.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Counters from one emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub batches: usize,
    pub links: usize,
    /// Failed attempts that were retried successfully.
    pub retries: usize,
}

/// Splits links into batches and delivers them with per-batch retry.
#[derive(Debug, Clone, Copy)]
pub struct LinkEmitter {
    batch_size: usize,
    max_attempts: usize,
}

impl LinkEmitter {
    pub fn new(config: &EmitConfig) -> Self {
        Self {
            batch_size: config.effective_batch_size(),
            max_attempts: config.effective_max_attempts(),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Delivers `links` in order. Stops at the first batch that exhausts its
    /// attempts; earlier batches stay delivered.
    pub fn emit<S>(&self, links: &[Link], sink: &mut S) -> Result<EmitReport, EmitError>
    where
        S: LinkSink + ?Sized,
    {
        let mut report = EmitReport::default();
        for (index, chunk) in links.chunks(self.batch_size).enumerate() {
            let batch = LinkBatch {
                index,
                links: chunk,
            };
            let mut attempt = 1;
            loop {
                match sink.emit_batch(&batch) {
                    Ok(()) => break,
                    Err(err) if attempt < self.max_attempts => {
                        warn!(
                            batch = index,
                            attempt,
                            max_attempts = self.max_attempts,
                            error = %err,
                            "link batch failed, retrying"
                        );
                        report.retries += 1;
                        attempt += 1;
                    }
                    Err(source) => {
                        return Err(EmitError::Batch {
                            index,
                            attempts: attempt,
                            source,
                        });
                    }
                }
            }
            debug!(batch = index, links = chunk.len(), "link batch emitted");
            report.batches += 1;
            report.links += chunk.len();
        }
        sink.finish().map_err(EmitError::Finish)?;
        Ok(report)
    }
}

/// Keeps every batch in memory. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    pub batches: Vec<Vec<Link>>,
}

impl CollectSink {
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.batches.iter().flatten()
    }
}

impl LinkSink for CollectSink {
    fn emit_batch(&mut self, batch: &LinkBatch<'_>) -> Result<(), SinkError> {
        self.batches.push(batch.links.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wellink_model::{ConfidenceTier, LinkStatus, MatchMethod, PermitNumber, UnitNumber};

    use super::*;

    fn links(count: usize) -> Vec<Link> {
        (0..count)
            .map(|n| Link {
                permit_number: PermitNumber::new(format!("P{n}")).unwrap(),
                unit_number: UnitNumber::new("001-000100-1-0000").unwrap(),
                method: MatchMethod::NameCounty,
                tier: ConfidenceTier::Medium,
                score: 0.7,
                lease_name: "SMITH".to_string(),
                provenance: "wellink:name".to_string(),
                status: LinkStatus::Proposed,
                needs_review: false,
            })
            .collect()
    }

    /// Fails the first `failures` calls, then accepts everything.
    struct FlakySink {
        failures: usize,
        calls: usize,
        accepted: usize,
    }

    impl LinkSink for FlakySink {
        fn emit_batch(&mut self, batch: &LinkBatch<'_>) -> Result<(), SinkError> {
            self.calls += 1;
            if self.calls <= self.failures {
                return Err(SinkError::Rejected("busy".to_string()));
            }
            self.accepted += batch.links.len();
            Ok(())
        }
    }

    #[test]
    fn splits_into_bounded_batches() {
        let config = EmitConfig {
            batch_size: 2,
            ..EmitConfig::default()
        };
        let mut sink = CollectSink::default();
        let report = LinkEmitter::new(&config)
            .emit(&links(5), &mut sink)
            .unwrap();
        assert_eq!(report.batches, 3);
        assert_eq!(report.links, 5);
        let sizes: Vec<usize> = sink.batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn retries_transient_failures() {
        let mut sink = FlakySink {
            failures: 2,
            calls: 0,
            accepted: 0,
        };
        let report = LinkEmitter::new(&EmitConfig::default())
            .emit(&links(3), &mut sink)
            .unwrap();
        assert_eq!(report.retries, 2);
        assert_eq!(sink.accepted, 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut sink = FlakySink {
            failures: usize::MAX,
            calls: 0,
            accepted: 0,
        };
        let err = LinkEmitter::new(&EmitConfig::default())
            .emit(&links(1), &mut sink)
            .unwrap_err();
        assert!(matches!(
            err,
            EmitError::Batch {
                index: 0,
                attempts: 3,
                ..
            }
        ));
        assert_eq!(sink.calls, 3);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let mut sink = CollectSink::default();
        let report = LinkEmitter::new(&EmitConfig::default())
            .emit(&[], &mut sink)
            .unwrap();
        assert_eq!(report, EmitReport::default());
        assert!(sink.batches.is_empty());
    }
}
