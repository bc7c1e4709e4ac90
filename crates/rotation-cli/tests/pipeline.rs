//! End-to-end runs over workbooks written to a temporary data folder.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use rotation_cli::config::RunConfig;
use rotation_cli::pipeline::{PipelineOptions, run_pipeline};
use rotation_core::RecapOrigin;
use rotation_ingest::{SheetSelector, column_strings, load_table};
use rotation_model::{Status, WeekOrigin};

const BANNER: &str = "ELECTROPLANET";

/// Writes a one-sheet workbook. Numeric-looking values become numbers.
fn write_sheet(path: &Path, sheet: &str, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name");
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let (row_idx, col_idx) = (r as u32, c as u16);
            match value.parse::<f64>() {
                Ok(number) => {
                    worksheet
                        .write_number(row_idx, col_idx, number)
                        .expect("write number");
                }
                Err(_) => {
                    worksheet
                        .write_string(row_idx, col_idx, *value)
                        .expect("write string");
                }
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

fn ean(n: u32) -> String {
    format!("611100000000{n}")
}

fn write_stock(dir: &Path) {
    let ids: Vec<String> = (1..=3).map(ean).collect();
    write_sheet(
        &dir.join("ExcelStock-20240308.xlsx"),
        "Stock",
        &[
            vec!["Libellé Enseigne", "EAN", "Marque", "Libellé EP", "P.Vente", "Stock EP"],
            vec![BANNER, &ids[0], "SAMSUNG", "TV 55", "10", "20"],
            vec![BANNER, &ids[1], "LG", "TV 43", "10", "3"],
            vec!["AUTRE", &ids[2], "SONY", "Barre de son", "10", "100"],
        ],
    );
}

fn write_sales(dir: &Path) {
    let ids: Vec<String> = (1..=6).map(ean).collect();
    write_sheet(
        &dir.join("ExcelVenteHebdo-20240308.xlsx"),
        "Ventes hebdomadaires",
        &[
            vec!["Libellé enseigne", "Début semaine", "EAN", "Quantité"],
            vec![BANNER, "04/03/2024", &ids[1], "5"],
            vec![BANNER, "04/03/2024", &ids[2], "60"],
            vec![BANNER, "04/03/2024", &ids[4], "2"],
            vec![BANNER, "04/03/2024", &ids[5], "7"],
            vec![BANNER, "26/02/2024", &ids[0], "3"],
            vec!["AUTRE", "04/03/2024", &ids[0], "9"],
        ],
    );
}

fn write_recap(dir: &Path) {
    let ids: Vec<String> = (1..=6).map(ean).collect();
    write_sheet(
        &dir.join("RECAP_EP.xlsx"),
        "Feuil1",
        &[
            vec!["Recap EP"],
            vec!["EAN", "MARQUE", "LIBELLE", "P.VENTE", "P.ACHAT", "STOCK EP", "BURINTEL"],
            vec![&ids[0], "SAMSUNG", "TV 55", "10", "8", "20", "5"],
            vec![&ids[1], "LG", "TV 43", "10", "8", "3", "0"],
            vec![&ids[2], "SONY", "Barre de son", "10", "8", "100", "10"],
            vec![&ids[3], "BEKO", "Four", "10", "8", "4", "0"],
            vec![&ids[4], "HP", "Imprimante", "10", "8", "0", "2"],
            vec![&ids[5], "", "Climatiseur HISENSE 12000 BTU", "10", "8", "14", "0"],
        ],
    );
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 8)
        .unwrap()
        .and_hms_opt(17, 5, 0)
        .unwrap()
}

fn options(dir: &TempDir) -> PipelineOptions {
    PipelineOptions {
        config: RunConfig {
            data_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("Dashboard"),
            ..RunConfig::default()
        },
        requested_week: None,
        dry_run: false,
        now: now(),
    }
}

fn no_prompt(_: &[NaiveDate]) -> Option<NaiveDate> {
    None
}

#[test]
fn full_run_writes_the_dashboard() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_sales(dir.path());
    write_recap(dir.path());

    let result = run_pipeline(&options(&dir), no_prompt).unwrap();
    let output = &result.output;

    assert_eq!(output.recap_origin, RecapOrigin::Recap);
    assert_eq!(output.records.len(), 6);
    assert_eq!(output.week.start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    assert_eq!(output.kpis.total_revenue, 740.0);
    assert_eq!(output.kpis.total_stock_secondary, 17);
    assert_eq!(output.records[0].status, Status::DeadStock);
    assert_eq!(output.records[5].brand, "HISENSE");

    let report = result.report.expect("report path");
    assert_eq!(
        report,
        dir.path().join("Dashboard").join("Suivi_EP_W10_08032024_1705.xlsx")
    );
    let listing = load_table(&report, &SheetSelector::Name("SUIVI".to_string()), None);
    assert_eq!(listing.height(), 6);
    let ids = column_strings(&listing, "EAN").unwrap();
    assert_eq!(ids[0], ean(3));
}

#[test]
fn requested_week_skips_the_prompt() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_sales(dir.path());
    write_recap(dir.path());

    let mut opts = options(&dir);
    opts.requested_week = NaiveDate::from_ymd_opt(2024, 2, 26);
    opts.dry_run = true;
    let result = run_pipeline(&opts, |_| panic!("prompt must not run")).unwrap();
    assert_eq!(result.output.week.origin, WeekOrigin::Requested);
    assert_eq!(result.output.kpis.total_units_sold, 3);
}

#[test]
fn prompt_sees_the_banner_weeks_latest_first() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_sales(dir.path());
    write_recap(dir.path());

    let mut opts = options(&dir);
    opts.dry_run = true;
    let mut seen = Vec::new();
    let result = run_pipeline(&opts, |weeks| {
        seen = weeks.to_vec();
        weeks.last().copied()
    })
    .unwrap();
    assert_eq!(
        seen,
        vec![
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 26).unwrap(),
        ]
    );
    assert_eq!(result.output.week.origin, WeekOrigin::Requested);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_sales(dir.path());
    write_recap(dir.path());

    let mut opts = options(&dir);
    opts.dry_run = true;
    let result = run_pipeline(&opts, no_prompt).unwrap();
    assert!(result.report.is_none());
    assert!(!dir.path().join("Dashboard").exists());
}

#[test]
fn stock_stands_in_for_a_missing_recap() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_sales(dir.path());

    let mut opts = options(&dir);
    opts.dry_run = true;
    let result = run_pipeline(&opts, no_prompt).unwrap();
    assert_eq!(result.output.recap_origin, RecapOrigin::StockFallback);
    assert_eq!(result.output.records.len(), 2);
    assert_eq!(result.output.kpis.total_units_sold, 5);
}

#[test]
fn missing_weekly_sales_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_recap(dir.path());

    let error = run_pipeline(&options(&dir), no_prompt).unwrap_err();
    assert!(format!("{error:#}").contains("weekly sales"));
}

#[test]
fn missing_stock_and_recap_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_sales(dir.path());

    let error = run_pipeline(&options(&dir), no_prompt).unwrap_err();
    assert!(format!("{error:#}").contains("neither stock"));
}

#[test]
fn no_banner_rows_anywhere_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_stock(dir.path());
    write_sales(dir.path());

    let mut opts = options(&dir);
    opts.config.banner = "MARJANE".to_string();
    let error = run_pipeline(&opts, no_prompt).unwrap_err();
    assert!(format!("{error:#}").contains("MARJANE"));
}
