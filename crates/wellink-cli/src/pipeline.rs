//! One linking run from input files to emitted batches.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};
use wellink_ingest::{IngestReport, read_links, read_targets, read_units, read_wells};
use wellink_link::{CollectSink, EmitReport, LinkConfig, LinkEmitter, LinkEngine, LinkSink};
use wellink_model::{Link, LinkKey, RunSummary};

use crate::sink::{JsonLinesSink, SqlBatchSink};

/// Name of the statistics file written next to the batches.
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    JsonLines,
    Sql,
}

/// Everything a run needs, resolved from arguments and configuration.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub wells: PathBuf,
    pub units: PathBuf,
    pub links: Option<PathBuf>,
    pub targets: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Target table for SQL batches.
    pub table: String,
    /// Link and batch as usual but write nothing.
    pub dry_run: bool,
    pub config: LinkConfig,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// Ingest reports in load order: wells, units, then existing links.
    pub inputs: Vec<IngestReport>,
    /// Number of target permits, when a target list was given.
    pub targets: Option<usize>,
    pub links: Vec<Link>,
    pub emit: EmitReport,
    /// Batch files written, in batch order.
    pub files: Vec<PathBuf>,
    /// `None` on a dry run.
    pub output_dir: Option<PathBuf>,
}

pub fn execute(request: &RunRequest) -> Result<RunOutcome> {
    let span = info_span!("run", dry_run = request.dry_run);
    let _guard = span.enter();
    let started = Instant::now();

    let wells = read_wells(&request.wells).context("load wells")?;
    let units = read_units(&request.units).context("load production units")?;
    let existing = match &request.links {
        Some(path) => Some(read_links(path).context("load existing links")?),
        None => None,
    };

    let mut engine = LinkEngine::new(request.config.clone());
    let mut target_count = None;
    if let Some(path) = &request.targets {
        let targets = read_targets(path).context("load target permits")?;
        target_count = Some(targets.len());
        engine = engine.with_targets(targets);
    }

    let existing_keys: &[LinkKey] = existing
        .as_ref()
        .map(|loaded| loaded.records.as_slice())
        .unwrap_or_default();
    let run = engine.run(&wells.records, &units.records, existing_keys);

    let emitter = LinkEmitter::new(&request.config.emit);
    let (emit, files, output_dir) = if request.dry_run {
        let mut sink = CollectSink::default();
        let report = emit_into(&emitter, &run.links, &mut sink)?;
        (report, Vec::new(), None)
    } else {
        let dir = &request.output_dir;
        fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
        let (report, files) = match request.format {
            OutputFormat::JsonLines => {
                let mut sink = JsonLinesSink::new(dir);
                let report = emit_into(&emitter, &run.links, &mut sink)?;
                (report, sink.into_files())
            }
            OutputFormat::Sql => {
                let mut sink = SqlBatchSink::new(dir, request.table.as_str());
                let report = emit_into(&emitter, &run.links, &mut sink)?;
                (report, sink.into_files())
            }
        };
        write_summary(dir, &run.summary)?;
        (report, files, Some(dir.clone()))
    };

    info!(
        links = run.links.len(),
        batches = emit.batches,
        retries = emit.retries,
        duration_ms = started.elapsed().as_millis(),
        "run complete"
    );

    let mut inputs = vec![wells.report, units.report];
    inputs.extend(existing.map(|loaded| loaded.report));
    Ok(RunOutcome {
        summary: run.summary,
        inputs,
        targets: target_count,
        links: run.links,
        emit,
        files,
        output_dir,
    })
}

fn emit_into<S: LinkSink>(emitter: &LinkEmitter, links: &[Link], sink: &mut S) -> Result<EmitReport> {
    emitter.emit(links, sink).context("emit links")
}

fn write_summary(dir: &Path, summary: &RunSummary) -> Result<()> {
    let path = dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))
}
