use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wellink_cli::pipeline::RunOutcome;
use wellink_model::{ConfidenceTier, MatchMethod, StrategyStats};

pub fn print_summary(outcome: &RunOutcome) {
    match &outcome.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: none (dry run)"),
    }
    print_input_table(outcome);
    if let Some(count) = outcome.targets {
        println!("Weighted targets: {count} permits");
    }
    print_strategy_table(outcome);
    print_method_table(outcome);
    println!(
        "Links: {} in {} batches ({} retries)",
        outcome.emit.links, outcome.emit.batches, outcome.emit.retries
    );
    for path in &outcome.files {
        println!("  {}", path.display());
    }
}

fn print_input_table(outcome: &RunOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Rows"),
        header_cell("Loaded"),
        header_cell("Skipped"),
        header_cell("Duplicates"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for report in &outcome.inputs {
        table.add_row(vec![
            Cell::new(report.path.display()),
            Cell::new(report.rows),
            Cell::new(report.accepted),
            count_cell(report.skipped, Color::Yellow),
            count_cell(report.duplicates, Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn print_strategy_table(outcome: &RunOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Strategy"),
        header_cell("Examined"),
        header_cell("Candidates"),
        header_cell("Links"),
        header_cell("Review"),
        header_cell("Ambiguous"),
        header_cell("Too many"),
        header_cell("No match"),
        header_cell("Skipped"),
        header_cell("Errors"),
        header_cell("Time"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..=10 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for report in &outcome.summary.reports {
        let mut row = vec![
            Cell::new(report.strategy.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        row.extend(stat_cells(&report.stats));
        row.push(dim_cell(format!("{} ms", report.duration_ms)));
        table.add_row(row);
    }
    let totals = outcome.summary.totals();
    let mut row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    row.extend(
        stat_cells(&totals)
            .into_iter()
            .map(|cell| cell.add_attribute(Attribute::Bold)),
    );
    row.push(dim_cell("-"));
    table.add_row(row);
    println!("{table}");
}

fn stat_cells(stats: &StrategyStats) -> Vec<Cell> {
    vec![
        Cell::new(stats.examined),
        Cell::new(stats.candidates_examined),
        count_cell(stats.links_created, Color::Green),
        count_cell(stats.needs_review, Color::Yellow),
        count_cell(stats.ambiguous, Color::Yellow),
        count_cell(stats.too_ambiguous, Color::Yellow),
        dim_cell(stats.no_match),
        dim_cell(stats.skipped),
        count_cell(stats.errors, Color::Red),
    ]
}

fn print_method_table(outcome: &RunOutcome) {
    let mut by_method: BTreeMap<MatchMethod, usize> = BTreeMap::new();
    for report in &outcome.summary.reports {
        for (method, count) in &report.stats.by_method {
            *by_method.entry(*method).or_insert(0) += count;
        }
    }
    if by_method.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Method"),
        header_cell("Tier"),
        header_cell("Review"),
        header_cell("Links"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for (method, count) in by_method {
        table.add_row(vec![
            Cell::new(method.as_str()),
            tier_cell(method.tier()),
            if method.needs_review() {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("no")
            },
            Cell::new(count),
        ]);
    }
    println!("{table}");
}

fn tier_cell(tier: ConfidenceTier) -> Cell {
    let color = match tier {
        ConfidenceTier::High => Color::Green,
        ConfidenceTier::Medium => Color::Yellow,
        ConfidenceTier::Low => Color::Red,
    };
    Cell::new(tier.as_str()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
