//! Integration tests for reading real workbooks
//!
//! Fixtures are generated with rust_xlsxwriter so that numeric cells, sheet
//! order and header offsets go through calamine exactly as a user's file would.

mod common;

use common::{sheet, write_workbook, Workspace};
use pinload::adapters::spreadsheet::{read_workbook, reader::file_checksum, SpreadsheetReader};
use pinload::config::InputConfig;
use pinload::domain::{PinloadError, ReadError};
use rust_xlsxwriter::Workbook;

fn input_config(sheets: &[&str], header_row: usize) -> InputConfig {
    InputConfig {
        sheets: sheets.iter().map(|s| s.to_string()).collect(),
        header_row,
        ..InputConfig::default()
    }
}

#[test]
fn test_reads_sheets_in_workbook_order() {
    let ws = Workspace::new();
    ws.write(&[
        ("Zeta", sheet(&[["MH", "Pune", "411001", "A"]])),
        ("Alpha", sheet(&[["KA", "Mysuru", "570001", "C"]])),
    ]);

    let workbook = read_workbook(ws.input(), &input_config(&[], 1)).unwrap();

    let names: Vec<_> = workbook.sheets.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
    assert_eq!(workbook.total_rows(), 2);
    assert_eq!(workbook.sheets[0].headers(), ["State", "City", "Pincode", "Cluster"]);
    assert_eq!(workbook.sheets[1].rows()[0], ["KA", "Mysuru", "570001", "C"]);
}

#[test]
fn test_numeric_pincode_is_read_as_digits() {
    let ws = Workspace::new();
    let mut book = Workbook::new();
    let sheet = book.add_worksheet();
    for (col, header) in ["State", "City", "Pincode", "Cluster"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "MH").unwrap();
    sheet.write_string(1, 1, "Pune").unwrap();
    sheet.write_number(1, 2, 411001.0).unwrap();
    sheet.write_number(1, 3, 7.0).unwrap();
    book.save(ws.input()).unwrap();

    let workbook = read_workbook(ws.input(), &input_config(&[], 1)).unwrap();

    assert_eq!(workbook.sheets[0].rows()[0], ["MH", "Pune", "411001", "7"]);
}

#[test]
fn test_sheet_filter_is_case_insensitive() {
    let ws = Workspace::new();
    ws.write(&[
        ("North", sheet(&[["MH", "Pune", "411001", "A"]])),
        ("South", sheet(&[["KA", "Mysuru", "570001", "C"]])),
    ]);

    let workbook = read_workbook(ws.input(), &input_config(&["south"], 1)).unwrap();

    assert_eq!(workbook.sheets.len(), 1);
    assert_eq!(workbook.sheets[0].name(), "South");
}

#[test]
fn test_unknown_sheet_in_filter() {
    let ws = Workspace::new();
    ws.write(&[("North", sheet(&[["MH", "Pune", "411001", "A"]]))]);

    let err = read_workbook(ws.input(), &input_config(&["East"], 1)).unwrap_err();

    assert!(matches!(
        err,
        PinloadError::Read(ReadError::SheetNotFound(ref name)) if name == "East"
    ));
}

#[test]
fn test_header_row_offset() {
    let ws = Workspace::new();
    write_workbook(
        &ws.input(),
        &[(
            "S",
            vec![
                vec!["Pincode to cluster mapping"],
                vec![],
                vec!["State", "City", "Pincode", "Cluster"],
                vec!["MH", "Pune", "411001", "A"],
            ],
        )],
    );

    let workbook = read_workbook(ws.input(), &input_config(&[], 3)).unwrap();
    let table = &workbook.sheets[0];

    assert_eq!(table.headers(), ["State", "City", "Pincode", "Cluster"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.row_number(0), 4);
}

#[test]
fn test_rows_below_header_row_keep_their_numbers() {
    let ws = Workspace::new();
    write_workbook(
        &ws.input(),
        &[(
            "S",
            vec![
                vec![],
                vec![],
                vec!["MH", "Pune", "411001", "A"],
                vec!["MH", "Pune", "411002", "A"],
            ],
        )],
    );

    let workbook = read_workbook(ws.input(), &input_config(&[], 1)).unwrap();
    let table = &workbook.sheets[0];

    assert!(table.headers().is_empty());
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.row_number(0), 3);
    assert_eq!(table.row_number(1), 4);
}

#[test]
fn test_empty_sheet_has_no_headers() {
    let ws = Workspace::new();
    write_workbook(
        &ws.input(),
        &[("Data", sheet(&[["MH", "Pune", "411001", "A"]])), ("Blank", vec![])],
    );

    let mut reader = SpreadsheetReader::open(ws.input(), 1).unwrap();
    let blank = reader.read_sheet("Blank").unwrap();

    assert!(blank.headers().is_empty());
    assert!(blank.is_empty());
}

#[test]
fn test_checksum_matches_file_bytes() {
    let ws = Workspace::new();
    ws.write(&[("S", sheet(&[["MH", "Pune", "411001", "A"]]))]);

    let workbook = read_workbook(ws.input(), &input_config(&[], 1)).unwrap();

    assert_eq!(workbook.checksum, file_checksum(ws.input()).unwrap());
    assert_eq!(workbook.checksum.len(), 64);
}

#[test]
fn test_corrupt_workbook() {
    let ws = Workspace::new();
    std::fs::write(ws.input(), b"not a zip archive").unwrap();

    let err = read_workbook(ws.input(), &input_config(&[], 1)).unwrap_err();

    assert!(matches!(err, PinloadError::Read(ReadError::OpenFailed { .. })));
}
