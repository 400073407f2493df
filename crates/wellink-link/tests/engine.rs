//! End-to-end runs of the engine over a small registry snapshot.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use wellink_link::{
    CollectSink, EmitConfig, LinkConfig, LinkEmitter, LinkEngine, LinkRun, MultiCandidatePolicy,
};
use wellink_model::{
    Link, LinkKey, MatchMethod, PermitNumber, ProductionUnit, StrategyKind, UnitClass, UnitNumber,
    Well, WellType,
};

fn permit(value: &str) -> PermitNumber {
    PermitNumber::new(value).unwrap()
}

fn unit_number(value: &str) -> UnitNumber {
    UnitNumber::new(value).unwrap()
}

fn snapshot_wells() -> Vec<Well> {
    vec![
        Well::new(permit("W1"), "Jones 2-10").with_location("Garvin", "10", "2N", "3W"),
        Well::new(permit("W2"), "Zulu")
            .with_operator("op-1")
            .with_type(WellType::Oil)
            .with_location("Garvin", "12", "3N", "4W"),
        Well::new(permit("W3"), "Smith Unit 3").with_location("Kay", "8", "25N", "1E"),
        Well::new(permit("W4"), "Brown"),
        Well::new(permit("W5"), "Unknown").with_location("Kay", "8", "25N", "1E"),
    ]
}

fn snapshot_units() -> Vec<ProductionUnit> {
    vec![
        ProductionUnit::new(unit_number("049-000100-1-0000"), "JONES")
            .with_location("Garvin", "10", "2N", "3W"),
        ProductionUnit::new(unit_number("049-000100-1-0040"), "JONES")
            .with_location("Garvin", "11", "2N", "3W"),
        ProductionUnit::new(unit_number("049-000300-1-0000"), "ALPHA")
            .with_operator("OP-1")
            .with_classification(UnitClass::Oil)
            .with_location("Garvin", "12", "3N", "4W"),
        ProductionUnit::new(unit_number("049-000400-1-0000"), "BRAVO")
            .with_operator("OP-1")
            .with_classification(UnitClass::Gas)
            .with_location("Garvin", "12", "3N", "4W"),
        ProductionUnit::new(unit_number("071-000100-1-0000"), "SMITH 3")
            .with_location("Kay", "8", "25N", "1E"),
    ]
}

fn render(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "{} -> {} {} {:.2} {}{}",
                link.permit_number,
                link.unit_number,
                link.method,
                link.score,
                link.tier,
                if link.needs_review { " review" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn keys(links: &[Link]) -> Vec<LinkKey> {
    links.iter().map(Link::key).collect()
}

#[test]
fn full_run_applies_strategies_in_order() {
    let existing = vec![LinkKey::new(permit("W4"), unit_number("049-000100-1-0000"))];
    let run = LinkEngine::new(LinkConfig::default()).run(
        &snapshot_wells(),
        &snapshot_units(),
        &existing,
    );

    insta::assert_snapshot!(render(&run.links), @r"
    W4 -> 049-000100-1-0040 merge-allocation 0.90 high
    W1 -> 049-000100-1-0000 name-alpha-county-trs 0.80 high
    W2 -> 049-000300-1-0000 operator-trs-welltype 0.80 medium
    W3 -> 071-000100-1-0000 weighted-auto 1.00 high
    ");

    let strategies: Vec<StrategyKind> = run
        .summary
        .reports
        .iter()
        .map(|report| report.strategy)
        .collect();
    assert_eq!(strategies, StrategyKind::ALL.to_vec());
    assert_eq!(run.summary.existing_links, 1);
    assert_eq!(run.summary.proposed_links(), 4);

    let weighted = &run.summary.reports[3].stats;
    assert_eq!(weighted.examined, 2);
    assert_eq!(weighted.no_match, 1);
    assert_eq!(weighted.by_method.get(&MatchMethod::WeightedAuto), Some(&1));
}

#[test]
fn reruns_converge_without_duplicates() {
    let wells = snapshot_wells();
    let units = snapshot_units();
    let engine = LinkEngine::new(LinkConfig::default());
    let mut existing = vec![LinkKey::new(permit("W4"), unit_number("049-000100-1-0000"))];

    let first = engine.run(&wells, &units, &existing);
    existing.extend(keys(&first.links));

    // W1 reached the primary allocation during the first run, after merge
    // propagation had already finished.
    let second = engine.run(&wells, &units, &existing);
    insta::assert_snapshot!(render(&second.links), @"W1 -> 049-000100-1-0040 merge-allocation 0.90 high");
    existing.extend(keys(&second.links));

    let third = engine.run(&wells, &units, &existing);
    assert!(third.links.is_empty());

    let unique: BTreeSet<&LinkKey> = existing.iter().collect();
    assert_eq!(unique.len(), existing.len());
}

#[test]
fn provenance_prefix_is_configurable() {
    let mut config = LinkConfig::default();
    config.emit.provenance = "nightly".to_string();
    let run = LinkEngine::new(config).run(&snapshot_wells(), &snapshot_units(), &[]);
    assert!(
        run.links
            .iter()
            .all(|link| link.provenance == format!("nightly:{}", link.method.strategy()))
    );
}

#[test]
fn run_links_flow_through_emitter() {
    let run = LinkEngine::new(LinkConfig::default()).run(
        &snapshot_wells(),
        &snapshot_units(),
        &[LinkKey::new(permit("W4"), unit_number("049-000100-1-0000"))],
    );
    let emit = EmitConfig {
        batch_size: 3,
        ..EmitConfig::default()
    };
    let mut sink = CollectSink::default();
    let report = LinkEmitter::new(&emit).emit(&run.links, &mut sink).unwrap();

    assert_eq!(report.batches, 2);
    assert_eq!(report.links, 4);
    let emitted: Vec<&Link> = sink.links().collect();
    assert_eq!(emitted.len(), run.links.len());
    assert_eq!(emitted[0], &run.links[0]);
}

#[test]
fn config_loads_from_partial_toml() {
    let config: LinkConfig = toml::from_str(
        r#"
        strategies = ["name", "operator-trs"]

        [operator]
        multi_candidate_policy = "defer"

        [emit]
        batch_size = 50
        "#,
    )
    .unwrap();

    assert_eq!(
        config.strategies,
        vec![StrategyKind::Name, StrategyKind::OperatorTrs]
    );
    assert_eq!(
        config.operator.multi_candidate_policy,
        MultiCandidatePolicy::Defer
    );
    assert_eq!(config.emit.batch_size, 50);
    assert_eq!(config.emit.max_attempts, 3);
    assert_eq!(config.name_match.max_candidates, 10);
    assert_eq!(config.weighted.auto_link_above, 90);
}

#[test]
fn unknown_config_keys_are_rejected() {
    let result: Result<LinkConfig, _> = toml::from_str("[emit]\nbatchsize = 5\n");
    assert!(result.is_err());
}

// --- properties ----------------------------------------------------------

const NAMES: &[&str] = &[
    "Jones 2-10",
    "JONES",
    "Smith Unit 3",
    "Smith 4",
    "Unknown",
    "Brown Ranch",
    "Tract 9",
];
const COUNTIES: &[&str] = &["Garvin", "Kay County", ""];
const OPERATORS: &[&str] = &["OP-1", "op-2", ""];
const MERGE_SEGMENTS: &[&str] = &["0000", "0010", "0020"];

fn wells_strategy() -> impl Strategy<Value = Vec<Well>> {
    prop::collection::vec(
        (
            prop::sample::select(NAMES),
            prop::sample::select(COUNTIES),
            1u8..4,
            prop::sample::select(OPERATORS),
            any::<bool>(),
        ),
        0..10,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(n, (name, county, section, operator, oil))| {
                Well::new(permit(&format!("W{n}")), name)
                    .with_operator(operator)
                    .with_type(if oil { WellType::Oil } else { WellType::Gas })
                    .with_location(county, section.to_string(), "5N", "3W")
            })
            .collect()
    })
}

fn units_strategy() -> impl Strategy<Value = Vec<ProductionUnit>> {
    prop::collection::vec(
        (
            1u32..5,
            prop::sample::select(MERGE_SEGMENTS),
            prop::sample::select(NAMES),
            prop::sample::select(COUNTIES),
            1u8..4,
            prop::sample::select(OPERATORS),
            any::<bool>(),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(lease, merge, name, county, section, operator, oil)| {
                ProductionUnit::new(unit_number(&format!("049-{lease:06}-1-{merge}")), name)
                    .with_operator(operator)
                    .with_classification(if oil { UnitClass::Oil } else { UnitClass::Gas })
                    .with_location(county, section.to_string(), "5N", "3W")
            })
            .collect()
    })
}

fn link_counts_per_well(run: &LinkRun) -> BTreeMap<(String, StrategyKind), Vec<MatchMethod>> {
    let mut counts: BTreeMap<(String, StrategyKind), Vec<MatchMethod>> = BTreeMap::new();
    for link in &run.links {
        counts
            .entry((link.permit_number.to_string(), link.method.strategy()))
            .or_default()
            .push(link.method);
    }
    counts
}

proptest! {
    #[test]
    fn runs_never_repeat_a_pair(wells in wells_strategy(), units in units_strategy()) {
        let engine = LinkEngine::new(LinkConfig::default());
        let first = engine.run(&wells, &units, &[]);

        let created: BTreeSet<LinkKey> = keys(&first.links).into_iter().collect();
        prop_assert_eq!(created.len(), first.links.len());

        let existing: Vec<LinkKey> = created.iter().cloned().collect();
        let second = engine.run(&wells, &units, &existing);
        for link in &second.links {
            prop_assert!(!created.contains(&link.key()));
            prop_assert_eq!(link.method, MatchMethod::MergeAllocation);
        }
    }

    #[test]
    fn well_driven_strategies_link_at_most_once(
        wells in wells_strategy(),
        units in units_strategy(),
    ) {
        let run = LinkEngine::new(LinkConfig::default()).run(&wells, &units, &[]);
        for ((_, strategy), methods) in link_counts_per_well(&run) {
            if strategy == StrategyKind::MergeAllocation {
                continue;
            }
            if methods.contains(&MatchMethod::OperatorTrsMulti) {
                prop_assert_eq!(methods.len(), 2);
            } else {
                prop_assert_eq!(methods.len(), 1);
            }
        }
    }
}
