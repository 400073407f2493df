//! File sinks: one file per batch, written whole so a retried batch simply
//! replaces its file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wellink_link::{LinkBatch, LinkSink, SinkError};
use wellink_model::Link;

/// Default target table for SQL batches.
pub const DEFAULT_TABLE: &str = "well_unit_links";

const COLUMNS: &[&str] = &[
    "permit_number",
    "unit_number",
    "method",
    "tier",
    "score",
    "lease_name",
    "provenance",
    "status",
    "needs_review",
];

/// Writes `links-NNNN.jsonl` files, one serialized link per line.
#[derive(Debug)]
pub struct JsonLinesSink {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl JsonLinesSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }
}

impl LinkSink for JsonLinesSink {
    fn emit_batch(&mut self, batch: &LinkBatch<'_>) -> Result<(), SinkError> {
        let mut body = String::new();
        for link in batch.links {
            let line = serde_json::to_string(link).map_err(|err| SinkError::Encode {
                permit_number: link.permit_number.to_string(),
                unit_number: link.unit_number.to_string(),
                message: err.to_string(),
            })?;
            body.push_str(&line);
            body.push('\n');
        }
        let path = batch_path(&self.dir, batch.index, "jsonl");
        write_whole(&path, &body)?;
        remember(&mut self.files, path);
        Ok(())
    }
}

/// Writes `links-NNNN.sql` files holding one insert-if-absent statement each.
#[derive(Debug)]
pub struct SqlBatchSink {
    dir: PathBuf,
    table: String,
    files: Vec<PathBuf>,
}

impl SqlBatchSink {
    pub fn new(dir: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            table: table.into(),
            files: Vec::new(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }
}

impl LinkSink for SqlBatchSink {
    fn emit_batch(&mut self, batch: &LinkBatch<'_>) -> Result<(), SinkError> {
        let path = batch_path(&self.dir, batch.index, "sql");
        write_whole(&path, &render_sql_batch(&self.table, batch.links))?;
        remember(&mut self.files, path);
        Ok(())
    }
}

/// Renders links as a single multi-row `INSERT` that skips pairs already
/// present in `table`. Empty input renders nothing.
pub fn render_sql_batch(table: &str, links: &[Link]) -> String {
    if links.is_empty() {
        return String::new();
    }
    let rows: Vec<String> = links
        .iter()
        .map(|link| {
            format!(
                "  ({}, {}, {}, {}, {:.2}, {}, {}, {}, {})",
                quote_literal(link.permit_number.as_str()),
                quote_literal(link.unit_number.as_str()),
                quote_literal(link.method.as_str()),
                quote_literal(link.tier.as_str()),
                link.score,
                quote_literal(&link.lease_name),
                quote_literal(&link.provenance),
                quote_literal(link.status.as_str()),
                if link.needs_review { "TRUE" } else { "FALSE" },
            )
        })
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES\n{}\nON CONFLICT (permit_number, unit_number) DO NOTHING;\n",
        quote_identifier(table),
        COLUMNS.join(", "),
        rows.join(",\n"),
    )
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Plain (optionally schema-qualified) names pass through; anything else is
/// double-quoted.
fn quote_identifier(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

fn batch_path(dir: &Path, index: usize, extension: &str) -> PathBuf {
    dir.join(format!("links-{index:04}.{extension}"))
}

fn write_whole(path: &Path, body: &str) -> Result<(), SinkError> {
    let staging = path.with_extension("partial");
    fs::write(&staging, body)?;
    fs::rename(&staging, path)?;
    debug!(path = %path.display(), bytes = body.len(), "wrote batch file");
    Ok(())
}

fn remember(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(quote_literal("O'BRIEN"), "'O''BRIEN'");
    }

    #[test]
    fn identifiers_quoted_only_when_needed() {
        assert_eq!(quote_identifier("public.well_unit_links"), "public.well_unit_links");
        assert_eq!(quote_identifier("well links"), "\"well links\"");
        assert_eq!(quote_identifier(""), "\"\"");
    }

    #[test]
    fn batch_files_are_numbered() {
        assert_eq!(
            batch_path(Path::new("out"), 12, "sql"),
            PathBuf::from("out/links-0012.sql")
        );
    }

    #[test]
    fn empty_batch_renders_nothing() {
        assert!(render_sql_batch(DEFAULT_TABLE, &[]).is_empty());
    }
}
