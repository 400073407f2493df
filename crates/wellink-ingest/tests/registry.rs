//! File-based loading through temporary directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use wellink_ingest::{IngestError, read_links, read_targets, read_units, read_wells};
use wellink_model::{UnitClass, WellType};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_a_registry_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let wells = write(
        &dir,
        "wells.csv",
        "permit_number,well_name,operator_id,well_type,county,section,township,range\n\
         35049-1,Jones 2-10,,Oil,Garvin,10,2N,3W\n\
         35049-2,Zulu,OP-1,G,Garvin,12,3N,4W\n",
    );
    let units = write(
        &dir,
        "units.csv",
        "unit_number,base_key,lease_name,operator_id,classification,county,section,township,range\n\
         04900010010000,,JONES,,OIL,Garvin,10,2N,3W\n\
         049-000300-1-0000,,ALPHA,OP-1,Gas Well,Garvin,12,3N,4W\n",
    );
    let links = write(
        &dir,
        "links.csv",
        "permit_number,unit_number\n35049-9,049-000100-1-0000\n35049-9,04900010010000\n",
    );

    let wells = read_wells(&wells).expect("wells");
    let units = read_units(&units).expect("units");
    let links = read_links(&links).expect("links");

    assert_eq!(wells.records.len(), 2);
    assert_eq!(wells.records[1].well_type, WellType::Gas);
    assert_eq!(units.records[0].unit_number.as_str(), "049-000100-1-0000");
    assert_eq!(units.records[1].classification, UnitClass::Gas);
    // Both spellings canonicalise to the same unit number.
    assert_eq!(links.records.len(), 1);
    assert_eq!(links.report.duplicates, 1);
}

#[test]
fn malformed_rows_are_counted_not_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let links = write(
        &dir,
        "links.csv",
        "permit_number,unit_number\nP1,001-000100-1-0000\nP2\n,001-000100-1-0000\nP3,001-000300-1-0000\n",
    );

    let loaded = read_links(&links).expect("links");

    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.report.rows, 4);
    assert_eq!(loaded.report.skipped, 2);
    assert_eq!(loaded.report.path, links);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_wells(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn targets_file_with_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "targets.csv", "permit_number\n35049-1\n35049-2\n35049-1\n");
    let targets = read_targets(&path).expect("targets");
    assert_eq!(targets.len(), 2);
}
