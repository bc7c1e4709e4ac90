//! Tests for the tabular source adapter.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use rotation_ingest::{
    IngestError, SheetSelector, column_strings, load_table, try_load_table,
};

/// Writes a one-sheet workbook; `rows` start at `first_row`.
fn write_sheet(path: &Path, sheet: &str, first_row: u32, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name");
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let row_idx = first_row + r as u32;
            let col_idx = c as u16;
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

fn recap_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|i| vec![format!("{}", 4006381333900u64 + i as u64), format!("{}", i + 1)])
        .collect()
}

fn as_refs(rows: &[Vec<String>]) -> Vec<Vec<&str>> {
    rows.iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect()
}

fn fixture(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

#[test]
fn named_sheet_loads_with_first_row_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "ExcelStock-1.xlsx");
    write_sheet(
        &path,
        "Stock",
        0,
        &[
            vec!["EAN", "Enseigne", "Quantité"],
            vec!["4006381333931", "ELECTROPLANET", "12"],
            vec!["123", "OTHER", "3"],
        ],
    );

    let df = load_table(&path, &SheetSelector::Name("Stock".into()), None);
    assert_eq!(df.height(), 2);
    assert_eq!(
        column_strings(&df, "EAN").unwrap(),
        vec!["4006381333931", "123"]
    );
    assert_eq!(column_strings(&df, "Quantité").unwrap(), vec!["12", "3"]);
}

#[test]
fn missing_named_sheet_is_empty_but_name_or_first_falls_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "ExcelVenteHebdo-1.xlsx");
    write_sheet(&path, "Feuil1", 0, &[vec!["EAN", "QTE"], vec!["1", "2"]]);

    let strict = load_table(&path, &SheetSelector::Name("Ventes hebdomadaires".into()), None);
    assert_eq!(strict.height(), 0);

    let lenient = load_table(
        &path,
        &SheetSelector::NameOrFirst("Ventes hebdomadaires".into()),
        None,
    );
    assert_eq!(lenient.height(), 1);
}

#[test]
fn header_search_accepts_first_row_with_identifier_and_enough_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "RECAP_EP.xlsx");
    let mut rows = vec![
        vec!["SUIVI RECAP".to_string()],
        vec![String::new()],
        vec!["ean".to_string(), "stock ep".to_string()],
    ];
    rows.extend(recap_rows(8));
    write_sheet(&path, "Feuil1", 0, &as_refs(&rows));

    let candidates = [0, 1, 2, 3, 4];
    let df = try_load_table(&path, &SheetSelector::first(), Some(&candidates)).expect("load recap");
    assert_eq!(df.height(), 8);
    assert!(df.column("ean").is_ok());
}

#[test]
fn header_search_requires_more_than_five_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "RECAP_small.xlsx");
    let mut rows = vec![vec!["EAN".to_string(), "STOCK EP".to_string()]];
    rows.extend(recap_rows(5));
    write_sheet(&path, "Feuil1", 0, &as_refs(&rows));

    let candidates = [0, 1, 2, 3, 4];
    let err = try_load_table(&path, &SheetSelector::first(), Some(&candidates)).unwrap_err();
    assert!(matches!(err, IngestError::NoHeaderDetected { .. }));
    assert_eq!(
        load_table(&path, &SheetSelector::first(), Some(&candidates)).height(),
        0
    );
}

#[test]
fn header_rows_are_absolute_sheet_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "RECAP_offset.xlsx");
    let mut rows = vec![vec!["EAN".to_string(), "STOCK EP".to_string()]];
    rows.extend(recap_rows(6));
    write_sheet(&path, "Feuil1", 3, &as_refs(&rows));

    let too_early = try_load_table(&path, &SheetSelector::first(), Some(&[0, 1, 2]));
    assert!(too_early.is_err());
    let df = try_load_table(&path, &SheetSelector::first(), Some(&[3])).expect("load");
    assert_eq!(df.height(), 6);
}

#[test]
fn unreadable_file_is_empty_not_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "ExcelStock-broken.xlsx");
    fs::write(&path, b"not a zip archive").expect("write");

    let df = load_table(&path, &SheetSelector::Name("Stock".into()), None);
    assert_eq!(df.height(), 0);
    assert!(matches!(
        try_load_table(&path, &SheetSelector::first(), None),
        Err(IngestError::WorkbookOpen { .. })
    ));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = try_load_table(&dir.path().join("absent.xlsx"), &SheetSelector::first(), None)
        .unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn csv_exports_load_through_the_same_contract() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "ExcelVenteHebdo-1.csv");
    fs::write(
        &path,
        "EAN;Libellé Enseigne;Début semaine;Quantité\n\
         123;ELECTROPLANET;04/03/2024;2\n\
         456;ELECTROPLANET;04/03/2024;1,5\n",
    )
    .expect("write csv");

    let df = load_table(&path, &SheetSelector::first(), None);
    assert_eq!(df.height(), 2);
    assert_eq!(
        column_strings(&df, "Quantité").unwrap(),
        vec!["2", "1,5"]
    );
}

#[test]
fn without_candidates_the_first_sheet_row_is_the_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = fixture(dir.path(), "ExcelStock-offset.xlsx");
    write_sheet(
        &path,
        "Stock",
        1,
        &[vec!["EAN", "Quantité"], vec!["123", "4"]],
    );

    let df = try_load_table(&path, &SheetSelector::Name("Stock".into()), None).expect("load");
    assert_eq!(df.height(), 2);
    assert_eq!(column_strings(&df, "COL_1").unwrap(), vec!["EAN", "123"]);
    assert_eq!(column_strings(&df, "EAN"), None);
}
