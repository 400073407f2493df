//! Whole runs from CSV inputs to batch files.

use std::fs;
use std::path::{Path, PathBuf};

use wellink_cli::config::read_config;
use wellink_cli::pipeline::{OutputFormat, RunRequest, SUMMARY_FILE, execute};
use wellink_cli::sink::DEFAULT_TABLE;
use wellink_link::LinkConfig;
use wellink_model::{MatchMethod, StrategyKind};

const WELLS: &str = "\
permit_number,well_name,operator_id,well_type,county,section,township,range
35049-1,Jones 2-10,,OIL,Garvin,10,2N,3W
35049-2,Zulu,OP-1,OIL,Garvin,12,3N,4W
35049-2,Zulu duplicate,OP-1,OIL,Garvin,12,3N,4W
35049-3,Brown,,,,,,
";

const UNITS: &str = "\
unit_number,lease_name,operator_id,classification,county,section,township,range
049-000100-1-0000,JONES,,,Garvin,10,2N,3W
049-000100-1-0040,JONES,,,Garvin,11,2N,3W
049-000300-1-0000,ALPHA,OP-1,Oil,Garvin,12,3N,4W
049-000400-1-0000,BRAVO,OP-1,Gas,Garvin,12,3N,4W
";

const LINKS: &str = "\
permit_number,unit_number
35049-3,049-000100-1-0000
";

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

fn request(dir: &Path) -> RunRequest {
    RunRequest {
        wells: write(dir, "wells.csv", WELLS),
        units: write(dir, "units.csv", UNITS),
        links: Some(write(dir, "links.csv", LINKS)),
        targets: None,
        output_dir: dir.join("out"),
        format: OutputFormat::Sql,
        table: DEFAULT_TABLE.to_string(),
        dry_run: false,
        config: LinkConfig::default(),
    }
}

#[test]
fn run_writes_sql_batches_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = execute(&request(dir.path())).unwrap();

    let methods: Vec<(String, MatchMethod)> = outcome
        .links
        .iter()
        .map(|link| (link.permit_number.to_string(), link.method))
        .collect();
    assert_eq!(
        methods,
        vec![
            ("35049-3".to_string(), MatchMethod::MergeAllocation),
            ("35049-1".to_string(), MatchMethod::NameAlphaCountyTrs),
            ("35049-2".to_string(), MatchMethod::OperatorTrsWellType),
        ]
    );

    assert_eq!(outcome.inputs.len(), 3);
    assert_eq!(outcome.inputs[0].accepted, 3);
    assert_eq!(outcome.inputs[0].duplicates, 1);
    assert_eq!(outcome.summary.existing_links, 1);
    assert_eq!(outcome.emit.links, 3);

    let out = dir.path().join("out");
    assert_eq!(outcome.output_dir.as_deref(), Some(out.as_path()));
    assert_eq!(outcome.files, vec![out.join("links-0000.sql")]);
    let sql = fs::read_to_string(&outcome.files[0]).unwrap();
    assert!(sql.contains("'35049-2', '049-000300-1-0000', 'operator-trs-welltype'"));
    assert!(sql.trim_end().ends_with("DO NOTHING;"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_FILE)).unwrap()).unwrap();
    assert_eq!(summary["wells"], 3);
    assert_eq!(summary["reports"].as_array().unwrap().len(), 4);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = request(dir.path());
    request.dry_run = true;
    request.format = OutputFormat::JsonLines;
    request.config.emit.batch_size = 2;

    let outcome = execute(&request).unwrap();
    assert_eq!(outcome.emit.links, 3);
    assert_eq!(outcome.emit.batches, 2);
    assert!(outcome.files.is_empty());
    assert!(outcome.output_dir.is_none());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn strategy_selection_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(
        dir.path(),
        "wellink.toml",
        "strategies = [\"operator-trs\"]\n\n[emit]\nprovenance = \"nightly\"\n",
    );
    let mut request = request(dir.path());
    request.config = read_config(&config_path).unwrap();
    request.format = OutputFormat::JsonLines;

    let outcome = execute(&request).unwrap();
    let reports: Vec<StrategyKind> = outcome
        .summary
        .reports
        .iter()
        .map(|report| report.strategy)
        .collect();
    assert_eq!(reports, vec![StrategyKind::OperatorTrs]);
    assert_eq!(outcome.links.len(), 1);
    assert_eq!(outcome.links[0].provenance, "nightly:operator-trs");
    assert_eq!(
        outcome.files,
        vec![dir.path().join("out").join("links-0000.jsonl")]
    );
}

#[test]
fn invalid_config_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.toml", "[weighted]\nauto_link = 80\n");
    let err = read_config(&path).unwrap_err();
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = request(dir.path());
    request.units = dir.path().join("absent.csv");
    let err = execute(&request).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("load production units"));
    assert!(message.contains("CSV file not found"));
}
