//! Sheet layout of the dashboard workbook as plain tabular regions.
//!
//! Layout is separate from rendering so the placement of every region can
//! be checked without writing a file.

use chrono::NaiveDateTime;
use rotation_core::{EngineOutput, format_amount, format_units, sorted_by_revenue};
use rotation_model::{
    Advisory, ArticleRecord, BrandRollup, Status, SummaryKpis, TopEntry, WeekSelection,
};

pub const DASHBOARD_SHEET: &str = "DASHBOARD";
pub const LISTING_SHEET: &str = "SUIVI";
pub const TOP_SHEET: &str = "TOP CA";
pub const BRAND_SHEET: &str = "TOP MARQUES";

/// First row of the top-N table on the dashboard.
pub const DASHBOARD_TOP_ROW: u32 = 12;

/// Rows left blank between consecutive dashboard regions.
const REGION_GAP: u32 = 2;

const LISTING_HEADERS: [&str; 13] = [
    "MARQUE",
    "EAN",
    "LIBELLE",
    "P.VENTE",
    "STOCK_EP",
    "BURINTEL_DEPOT",
    "STOCK_TOTAL",
    "VENTES_HEBDO",
    "CUMUL_VENTE",
    "CA_HEBDO",
    "ROTATION",
    "COUVERTURE",
    "STATUS",
];

const TOP_HEADERS: [&str; 6] = ["RANG", "MARQUE", "ARTICLE", "CA", "VENTES", "STATUS"];

const BRAND_HEADERS: [&str; 5] = ["MARQUE", "VENTES_HEBDO", "STOCK_TOTAL", "ARTICLES", "ROTATION"];

const GLOSSARY: [(&str, &str); 6] = [
    ("CA_HEBDO", "VENTES_HEBDO x P.VENTE"),
    ("STOCK_TOTAL", "STOCK_EP + BURINTEL_DEPOT"),
    ("ROTATION", "VENTES_HEBDO / STOCK_EP, 0 without shelf stock"),
    ("COUVERTURE", "STOCK_EP / VENTES_HEBDO x 7 days, 999 without sales"),
    (
        "STATUS",
        "DEAD STOCK if no sales and STOCK_EP > 10, else URGENT if COUVERTURE < 14, \
         else TO ORDER if COUVERTURE < 28, else BLOCKBUSTER if ROTATION > 0.5, else STABLE",
    ),
    ("TOP", "articles with ROTATION > 0.5"),
];

/// One cell of a region.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
    Status(Status),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Rendered text, used for column sizing.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Integer(value) => value.to_string(),
            Cell::Number(value) => format!("{value:.2}"),
            Cell::Status(status) => status.label().to_string(),
        }
    }
}

/// A header row plus data rows anchored at `origin_row`.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub origin_row: u32,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Region {
    fn new(origin_row: u32, headers: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            origin_row,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Row right after the last data row.
    pub fn end_row(&self) -> u32 {
        self.origin_row + 1 + self.rows.len() as u32
    }
}

/// A named sheet and its regions, in writing order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub regions: Vec<Region>,
}

/// Everything the workbook shows.
#[derive(Debug, Clone)]
pub struct ReportPayload {
    pub week: WeekSelection,
    pub records: Vec<ArticleRecord>,
    pub top: Vec<TopEntry>,
    pub brands: Vec<BrandRollup>,
    pub kpis: SummaryKpis,
    pub advisories: Vec<Advisory>,
    /// File name prefix, e.g. `EP`.
    pub prefix: String,
    pub currency: String,
    pub generated_at: NaiveDateTime,
}

impl ReportPayload {
    pub fn from_output(
        output: &EngineOutput,
        prefix: impl Into<String>,
        currency: impl Into<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            week: output.week,
            records: output.records.clone(),
            top: output.top.clone(),
            brands: output.brands.clone(),
            kpis: output.kpis.clone(),
            advisories: output.advisories.clone(),
            prefix: prefix.into(),
            currency: currency.into(),
            generated_at,
        }
    }
}

fn kpi_region(payload: &ReportPayload) -> Region {
    let kpis = &payload.kpis;
    let rows = vec![
        vec![
            Cell::text(format!("CA W{:02}", payload.week.iso_week())),
            Cell::text(format_amount(kpis.total_revenue, &payload.currency)),
        ],
        vec![Cell::text("STOCK EP"), Cell::text(format_units(kpis.total_stock_primary))],
        vec![
            Cell::text("STOCK BURINTEL"),
            Cell::text(format_units(kpis.total_stock_secondary)),
        ],
        vec![Cell::text("VENTES"), Cell::text(format_units(kpis.total_units_sold))],
        vec![Cell::text("URGENTS"), Cell::Integer(kpis.urgent_count as i64)],
        vec![Cell::text("TOP ROTATION"), Cell::Integer(kpis.top_rotation_count as i64)],
        vec![Cell::text("ARTICLES"), Cell::Integer(kpis.article_count as i64)],
        vec![Cell::text("SEMAINE DU"), Cell::text(payload.week.display_date())],
        vec![
            Cell::text("GENERE LE"),
            Cell::text(payload.generated_at.format("%d/%m/%Y %H:%M").to_string()),
        ],
    ];
    Region::new(0, &["KPI", "VALEUR"], rows)
}

fn top_region(origin_row: u32, top: &[TopEntry]) -> Region {
    let rows = top
        .iter()
        .map(|entry| {
            vec![
                Cell::text(entry.rank_label()),
                Cell::text(entry.brand.clone()),
                Cell::text(entry.description.clone()),
                Cell::Number(entry.weekly_revenue),
                Cell::Integer(entry.weekly_units_sold),
                Cell::Status(entry.status),
            ]
        })
        .collect();
    Region::new(origin_row, &TOP_HEADERS, rows)
}

fn advisory_region(origin_row: u32, advisories: &[Advisory]) -> Region {
    let rows = advisories
        .iter()
        .map(|line| vec![Cell::text(line.label.clone()), Cell::text(line.text.clone())])
        .collect();
    Region::new(origin_row, &["RECOMMANDATIONS", "DETAIL"], rows)
}

fn glossary_region(origin_row: u32) -> Region {
    let rows = GLOSSARY
        .iter()
        .map(|(name, formula)| vec![Cell::text(*name), Cell::text(*formula)])
        .collect();
    Region::new(origin_row, &["INDICATEUR", "FORMULE"], rows)
}

fn dashboard(payload: &ReportPayload) -> SheetLayout {
    let mut regions = vec![kpi_region(payload)];
    let mut next_row = DASHBOARD_TOP_ROW;
    if !payload.top.is_empty() {
        let top = top_region(DASHBOARD_TOP_ROW, &payload.top);
        next_row = top.end_row() + REGION_GAP;
        regions.push(top);
    }
    let advice = advisory_region(next_row, &payload.advisories);
    let glossary = glossary_region(advice.end_row() + REGION_GAP);
    regions.push(advice);
    regions.push(glossary);
    SheetLayout {
        name: DASHBOARD_SHEET.to_string(),
        regions,
    }
}

fn listing(records: &[ArticleRecord]) -> SheetLayout {
    let rows = sorted_by_revenue(records)
        .into_iter()
        .map(|r| {
            vec![
                Cell::text(r.brand.clone()),
                Cell::text(r.identifier.clone()),
                Cell::text(r.description.clone()),
                Cell::Number(r.unit_sale_price),
                Cell::Integer(r.stock_primary),
                Cell::Integer(r.stock_secondary),
                Cell::Integer(r.total_stock),
                Cell::Integer(r.weekly_units_sold),
                Cell::Integer(r.cumulative_units_sold),
                Cell::Number(r.weekly_revenue),
                Cell::Number(r.rotation),
                Cell::Number(r.coverage_days),
                Cell::Status(r.status),
            ]
        })
        .collect();
    SheetLayout {
        name: LISTING_SHEET.to_string(),
        regions: vec![Region::new(0, &LISTING_HEADERS, rows)],
    }
}

fn brand_sheet(brands: &[BrandRollup]) -> SheetLayout {
    let rows = brands
        .iter()
        .map(|b| {
            vec![
                Cell::text(b.brand.clone()),
                Cell::Integer(b.total_weekly_units_sold),
                Cell::Integer(b.total_stock),
                Cell::Integer(b.article_count as i64),
                Cell::Number(b.rotation),
            ]
        })
        .collect();
    SheetLayout {
        name: BRAND_SHEET.to_string(),
        regions: vec![Region::new(0, &BRAND_HEADERS, rows)],
    }
}

/// Lays out every sheet of the report, in workbook order.
///
/// The brand sheet is left out when there is no brand to show.
pub fn layout_report(payload: &ReportPayload) -> Vec<SheetLayout> {
    let mut sheets = vec![
        dashboard(payload),
        listing(&payload.records),
        SheetLayout {
            name: TOP_SHEET.to_string(),
            regions: vec![top_region(0, &payload.top)],
        },
    ];
    if !payload.brands.is_empty() {
        sheets.push(brand_sheet(&payload.brands));
    }
    sheets
}
