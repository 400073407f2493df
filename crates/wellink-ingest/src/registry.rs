//! Readers for the well, unit, link and target registries.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use wellink_model::{
    BaseKey, LinkKey, PermitNumber, ProductionUnit, UnitClass, UnitNumber, Well, WellType,
};

use crate::error::{IngestError, Result};

/// Row counts for one loaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub path: PathBuf,
    /// Data rows read, excluding the header and blank lines.
    pub rows: usize,
    pub accepted: usize,
    /// Rows that failed to parse or lacked their identity.
    pub skipped: usize,
    /// Rows whose identity was already loaded; the first occurrence wins.
    pub duplicates: usize,
}

/// Records loaded from one file plus its report.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub report: IngestReport,
}

#[derive(Debug, Deserialize)]
struct WellRow {
    permit_number: String,
    #[serde(default, alias = "name")]
    well_name: String,
    #[serde(default)]
    operator_id: String,
    #[serde(default)]
    well_type: String,
    #[serde(default)]
    county: String,
    #[serde(default)]
    section: String,
    #[serde(default)]
    township: String,
    #[serde(default)]
    range: String,
}

#[derive(Debug, Deserialize)]
struct UnitRow {
    unit_number: String,
    #[serde(default)]
    base_key: String,
    #[serde(default)]
    lease_name: String,
    #[serde(default)]
    operator_id: String,
    #[serde(default)]
    classification: String,
    #[serde(default)]
    county: String,
    #[serde(default)]
    section: String,
    #[serde(default)]
    township: String,
    #[serde(default)]
    range: String,
}

#[derive(Debug, Deserialize)]
struct LinkRow {
    permit_number: String,
    unit_number: String,
}

impl WellRow {
    fn into_well(self) -> std::result::Result<Well, wellink_model::ModelError> {
        let permit_number = PermitNumber::new(self.permit_number)?;
        Ok(Well::new(permit_number, self.well_name)
            .with_operator(self.operator_id)
            .with_type(WellType::from_tag(&self.well_type))
            .with_location(self.county, self.section, self.township, self.range))
    }
}

impl UnitRow {
    fn into_unit(self) -> std::result::Result<ProductionUnit, wellink_model::ModelError> {
        let unit_number = UnitNumber::new(self.unit_number)?;
        let mut unit = ProductionUnit::new(unit_number, self.lease_name)
            .with_operator(self.operator_id)
            .with_classification(UnitClass::from_tag(&self.classification))
            .with_location(self.county, self.section, self.township, self.range);
        if let Some(base_key) = BaseKey::explicit(&self.base_key) {
            unit = unit.with_base_key(base_key);
        }
        Ok(unit)
    }
}

impl LinkRow {
    fn into_key(self) -> std::result::Result<LinkKey, wellink_model::ModelError> {
        Ok(LinkKey::new(
            PermitNumber::new(self.permit_number)?,
            UnitNumber::new(self.unit_number)?,
        ))
    }
}

/// Loads wells from a CSV file. Duplicate permit numbers keep the first row.
pub fn read_wells(path: &Path) -> Result<Loaded<Well>> {
    read_wells_from(open(path)?, path)
}

pub fn read_wells_from<R: Read>(reader: R, path: &Path) -> Result<Loaded<Well>> {
    load(
        reader,
        path,
        &["permit_number"],
        WellRow::into_well,
        |well: &Well| well.permit_number.clone(),
    )
}

/// Loads production units from a CSV file. Duplicate unit numbers keep the first row.
pub fn read_units(path: &Path) -> Result<Loaded<ProductionUnit>> {
    read_units_from(open(path)?, path)
}

pub fn read_units_from<R: Read>(reader: R, path: &Path) -> Result<Loaded<ProductionUnit>> {
    load(
        reader,
        path,
        &["unit_number"],
        UnitRow::into_unit,
        |unit: &ProductionUnit| unit.unit_number.clone(),
    )
}

/// Loads existing (permit, unit) links from a CSV file.
pub fn read_links(path: &Path) -> Result<Loaded<LinkKey>> {
    read_links_from(open(path)?, path)
}

pub fn read_links_from<R: Read>(reader: R, path: &Path) -> Result<Loaded<LinkKey>> {
    load(
        reader,
        path,
        &["permit_number", "unit_number"],
        LinkRow::into_key,
        LinkKey::clone,
    )
}

/// Loads a target permit list: one permit per line, or a CSV whose first
/// column is the permit. A `permit_number` header line is ignored.
pub fn read_targets(path: &Path) -> Result<BTreeSet<PermitNumber>> {
    read_targets_from(open(path)?, path)
}

pub fn read_targets_from<R: Read>(reader: R, path: &Path) -> Result<BTreeSet<PermitNumber>> {
    let mut targets = BTreeSet::new();
    for line in BufReader::new(reader).lines() {
        let line = line.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let first = line
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches(|ch: char| ch == '"' || ch == '\u{feff}');
        if first.eq_ignore_ascii_case("permit_number") {
            continue;
        }
        if let Ok(permit) = PermitNumber::new(first) {
            targets.insert(permit);
        }
    }
    debug!(path = %path.display(), targets = targets.len(), "loaded target permits");
    Ok(targets)
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

fn load<R, Row, T, K, E>(
    reader: R,
    path: &Path,
    required: &[&'static str],
    convert: impl Fn(Row) -> std::result::Result<T, E>,
    identity: impl Fn(&T) -> K,
) -> Result<Loaded<T>>
where
    R: Read,
    Row: DeserializeOwned,
    K: Ord,
    E: std::fmt::Display,
{
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers: StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    for &column in required {
        if !headers.iter().any(|header| header == column) {
            return Err(IngestError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    reader.set_headers(headers.clone());

    let mut report = IngestReport {
        path: path.to_path_buf(),
        ..IngestReport::default()
    };
    let mut seen = BTreeSet::new();
    let mut records = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let line = reader.position().line();
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) if err.is_io_error() => return Err(csv_error(err)),
            Err(err) => {
                report.rows += 1;
                report.skipped += 1;
                warn!(path = %path.display(), line, error = %err, "skipping unreadable row");
                continue;
            }
        }
        if record.iter().all(str::is_empty) {
            continue;
        }
        report.rows += 1;
        let parsed = record
            .deserialize::<Row>(Some(&headers))
            .map_err(|err| err.to_string())
            .and_then(|row| convert(row).map_err(|err| err.to_string()));
        match parsed {
            Ok(item) => {
                if seen.insert(identity(&item)) {
                    report.accepted += 1;
                    records.push(item);
                } else {
                    report.duplicates += 1;
                    debug!(path = %path.display(), line, "duplicate row ignored");
                }
            }
            Err(error) => {
                report.skipped += 1;
                warn!(path = %path.display(), line, error = %error, "skipping row");
            }
        }
    }
    Ok(Loaded { records, report })
}
