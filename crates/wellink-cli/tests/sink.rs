//! File sinks driven through the link emitter.

use std::fs;

use wellink_cli::sink::{DEFAULT_TABLE, JsonLinesSink, SqlBatchSink, render_sql_batch};
use wellink_link::{EmitConfig, LinkEmitter};
use wellink_model::{
    ConfidenceTier, Link, LinkStatus, MatchMethod, PermitNumber, UnitNumber,
};

fn link(permit: &str, unit: &str, method: MatchMethod, score: f64, lease: &str) -> Link {
    Link {
        permit_number: PermitNumber::new(permit).unwrap(),
        unit_number: UnitNumber::new(unit).unwrap(),
        method,
        tier: method.tier(),
        score,
        lease_name: lease.to_string(),
        provenance: format!("wellink:{}", method.strategy()),
        status: LinkStatus::Proposed,
        needs_review: method.needs_review(),
    }
}

fn sample_links() -> Vec<Link> {
    vec![
        link(
            "W1",
            "049-000100-1-0000",
            MatchMethod::NameAlphaCountyTrs,
            0.80,
            "JONES",
        ),
        link(
            "W2",
            "049-000200-1-0000",
            MatchMethod::WeightedReview,
            0.75,
            "O'BRIEN",
        ),
    ]
}

#[test]
fn sql_batch_inserts_if_absent() {
    insta::assert_snapshot!(render_sql_batch(DEFAULT_TABLE, &sample_links()), @r"
    INSERT INTO well_unit_links (permit_number, unit_number, method, tier, score, lease_name, provenance, status, needs_review) VALUES
      ('W1', '049-000100-1-0000', 'name-alpha-county-trs', 'high', 0.80, 'JONES', 'wellink:name', 'proposed', FALSE),
      ('W2', '049-000200-1-0000', 'weighted-review', 'medium', 0.75, 'O''BRIEN', 'wellink:weighted', 'proposed', TRUE)
    ON CONFLICT (permit_number, unit_number) DO NOTHING;
    ");
}

#[test]
fn sql_sink_writes_one_file_per_batch() {
    let dir = tempfile::tempdir().unwrap();
    let emit = EmitConfig {
        batch_size: 1,
        ..EmitConfig::default()
    };
    let mut sink = SqlBatchSink::new(dir.path(), "staging.links");
    let report = LinkEmitter::new(&emit)
        .emit(&sample_links(), &mut sink)
        .unwrap();

    assert_eq!(report.batches, 2);
    let names: Vec<String> = sink
        .files()
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["links-0000.sql", "links-0001.sql"]);

    let second = fs::read_to_string(&sink.files()[1]).unwrap();
    assert!(second.starts_with("INSERT INTO staging.links ("));
    assert!(second.contains("'O''BRIEN'"));
    assert!(!second.contains("'JONES'"));
    assert!(!dir.path().join("links-0001.partial").exists());
}

#[test]
fn jsonl_sink_writes_one_link_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = JsonLinesSink::new(dir.path());
    let report = LinkEmitter::new(&EmitConfig::default())
        .emit(&sample_links(), &mut sink)
        .unwrap();
    assert_eq!(report.batches, 1);
    assert_eq!(report.links, 2);

    let files = sink.into_files();
    assert_eq!(files.len(), 1);
    let body = fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<serde_json::Value> = body
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["permit_number"], "W1");
    assert_eq!(lines[0]["method"], "name-alpha-county-trs");
    assert_eq!(lines[0]["tier"], "high");
    assert_eq!(lines[1]["needs_review"], true);
    assert_eq!(lines[1]["status"], "proposed");

    let decoded: Link = serde_json::from_str(body.lines().next().unwrap()).unwrap();
    assert_eq!(decoded.tier, ConfidenceTier::High);
}

#[test]
fn missing_directory_fails_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = JsonLinesSink::new(dir.path().join("absent"));
    let emit = EmitConfig {
        max_attempts: 2,
        ..EmitConfig::default()
    };
    let err = LinkEmitter::new(&emit)
        .emit(&sample_links(), &mut sink)
        .unwrap_err();
    assert!(err.to_string().starts_with("batch 0 failed after 2 attempts"));
    assert!(sink.files().is_empty());
}
