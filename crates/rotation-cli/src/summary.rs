//! Console summary of a run, as tables or JSON.

use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rotation_core::{EngineOutput, RecapOrigin, format_amount, format_units};
use rotation_model::{CohortCounts, Status, SummaryKpis, TopEntry, WeekOrigin};
use serde::Serialize;

use crate::pipeline::PipelineResult;

fn origin_label(origin: WeekOrigin) -> &'static str {
    match origin {
        WeekOrigin::Requested => "requested",
        WeekOrigin::Latest => "latest in sales",
        WeekOrigin::Today => "no dated sales, run date",
    }
}

fn catalogue_label(origin: RecapOrigin) -> &'static str {
    match origin {
        RecapOrigin::Recap => "recap",
        RecapOrigin::StockFallback => "stock fallback",
    }
}

/// Plain lines printed above the tables.
pub fn summary_lines(output: &EngineOutput, report: Option<&Path>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Week W{:02} starting {} ({})",
            output.week.iso_week(),
            output.week.display_date(),
            origin_label(output.week.origin)
        ),
        format!(
            "Catalogue: {}, {} articles",
            catalogue_label(output.recap_origin),
            output.records.len()
        ),
    ];
    lines.push(match report {
        Some(path) => format!("Report: {}", path.display()),
        None => "Report: not written (dry run)".to_string(),
    });
    if output.unmatched_sales > 0 {
        lines.push(format!(
            "Unmatched sales: {} identifiers not in the catalogue",
            output.unmatched_sales
        ));
    }
    lines
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: Status) -> Cell {
    let cell = Cell::new(status.label());
    match status {
        Status::Urgent => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Status::DeadStock => cell.fg(Color::DarkYellow),
        Status::ToOrder => cell.fg(Color::Yellow),
        Status::Blockbuster => cell.fg(Color::Green),
        Status::Stable => cell.fg(Color::DarkGrey),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn kpi_table(output: &EngineOutput, currency: &str) -> Table {
    let kpis = &output.kpis;
    let mut table = Table::new();
    table.set_header(vec![header_cell("KPI"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(String, String); 7] = [
        (
            format!("Revenue W{:02}", output.week.iso_week()),
            format_amount(kpis.total_revenue, currency),
        ),
        ("Shelf stock".to_string(), format_units(kpis.total_stock_primary)),
        ("Depot stock".to_string(), format_units(kpis.total_stock_secondary)),
        ("Units sold".to_string(), format_units(kpis.total_units_sold)),
        ("Urgent (< 14 days)".to_string(), kpis.urgent_count.to_string()),
        ("Top rotation (> 0.5)".to_string(), kpis.top_rotation_count.to_string()),
        ("Articles".to_string(), kpis.article_count.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn top_table(top: &[TopEntry], currency: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Brand"),
        header_cell("Article"),
        header_cell("Revenue"),
        header_cell("Units"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for entry in top {
        table.add_row(vec![
            Cell::new(entry.rank_label()),
            Cell::new(&entry.brand).add_attribute(Attribute::Bold),
            Cell::new(&entry.description),
            Cell::new(format_amount(entry.weekly_revenue, currency)),
            Cell::new(entry.weekly_units_sold),
            status_cell(entry.status),
        ]);
    }
    table
}

pub fn print_summary(result: &PipelineResult, currency: &str) {
    let output = &result.output;
    for line in summary_lines(output, result.report.as_deref()) {
        println!("{line}");
    }
    println!("{}", kpi_table(output, currency));
    if !output.top.is_empty() {
        println!("{}", top_table(&output.top, currency));
    }
    for advisory in &output.advisories {
        println!("{}: {}", advisory.label, advisory.text);
    }
    if !output.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &output.warnings {
            eprintln!("- {warning}");
        }
    }
}

/// Machine-readable run summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub week_start: String,
    pub iso_week: u32,
    pub week_origin: WeekOrigin,
    pub catalogue: &'static str,
    pub report: Option<String>,
    pub kpis: SummaryKpis,
    pub counts: CohortCounts,
    pub top: Vec<TopEntry>,
    pub unmatched_sales: usize,
    pub warnings: Vec<String>,
}

impl RunSummary {
    pub fn new(output: &EngineOutput, report: Option<&Path>) -> Self {
        Self {
            week_start: output.week.start.format("%Y-%m-%d").to_string(),
            iso_week: output.week.iso_week(),
            week_origin: output.week.origin,
            catalogue: catalogue_label(output.recap_origin),
            report: report.map(|path| path.display().to_string()),
            kpis: output.kpis.clone(),
            counts: output.counts.clone(),
            top: output.top.clone(),
            unmatched_sales: output.unmatched_sales,
            warnings: output.warnings.clone(),
        }
    }
}

pub fn print_json(result: &PipelineResult) -> serde_json::Result<()> {
    let summary = RunSummary::new(&result.output, result.report.as_deref());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
