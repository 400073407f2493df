use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::Table;
use wellink_model::{MatchMethod, StrategyKind};

use wellink_cli::config::{ConfigOverrides, apply_overrides, load_config};
use wellink_cli::pipeline::{OutputFormat, RunOutcome, RunRequest, execute};

use crate::cli::{OutputFormatArg, RunArgs};
use crate::summary::apply_table_style;

pub fn run_strategies() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Strategy", "Description", "Methods"]);
    apply_table_style(&mut table);
    for kind in StrategyKind::ALL {
        let methods: Vec<&str> = kind.methods().iter().map(MatchMethod::as_str).collect();
        table.add_row(vec![
            kind.as_str().to_string(),
            kind.description().to_string(),
            methods.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_link(args: &RunArgs) -> Result<RunOutcome> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(
        &mut config,
        &ConfigOverrides {
            strategies: args.strategies.iter().map(|&arg| arg.into()).collect(),
            batch_size: args.batch_size,
        },
    );
    let request = RunRequest {
        wells: args.wells.clone(),
        units: args.units.clone(),
        links: args.links.clone(),
        targets: args.targets.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.wells)),
        format: match args.format {
            OutputFormatArg::Jsonl => OutputFormat::JsonLines,
            OutputFormatArg::Sql => OutputFormat::Sql,
        },
        table: args.table.clone(),
        dry_run: args.dry_run,
        config,
    };
    execute(&request)
}

fn default_output_dir(wells: &Path) -> PathBuf {
    wells
        .parent()
        .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
}
