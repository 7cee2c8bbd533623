use std::fs;

use loadgen_core::workbook::TEMPLATE_FILE_NAME;
use loadgen_core::{convert, read_workbook, write_artifacts, write_template, ConvertSettings, GenError};
use rust_xlsxwriter::Workbook;

#[test]
fn template_converts_to_sacs_deck() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join(TEMPLATE_FILE_NAME);
    write_template(&workbook).unwrap();

    let table = read_workbook(&workbook, None).unwrap();
    let result = convert(&table, &ConvertSettings::default()).unwrap();

    let output = result.output_text();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "LOADCNDL");
    assert_eq!(
        lines[1],
        "LOAD   0101         0.0    0.0  -12.5    0.0     0.0    0.0 GLOB JOIN   DECK     "
    );
    assert!(lines[3].starts_with("LOAD   0103         0.0    0.0 -45.25    3.5"));
    assert_eq!(lines[4], "LOADCNWX");
    assert!(lines[5].contains("GLOB JOIN   WIND"));
    for card in lines.iter().filter(|l| l.starts_with("LOAD ")) {
        assert_eq!(card.len(), 81);
    }

    assert_eq!(result.summary.load_cards, 5);
    assert_eq!(result.summary.conditions, 2);
    assert_eq!(result.summary.skipped_rows, 1);
    assert!(result.log_text().is_none());

    let deck = dir.path().join("sacs_output.txt");
    let log = dir.path().join("rounding_log.txt");
    let written = write_artifacts(&result, &deck, &log).unwrap();
    assert!(written.log.is_none());
    assert_eq!(fs::read_to_string(&deck).unwrap(), output);
}

#[test]
fn long_values_are_rounded_and_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loads.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = [
        "LOAD CONDITION",
        "LOAD ID",
        "JOINT NAME",
        "Force(X) kN",
        "Force(Y) kN",
        "Force(Z) kN",
        "Moment(X) kNm",
        "Moment(Y) kNm",
        "Moment(Z) kNm",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "LC1").unwrap();
    sheet.write_string(1, 1, "J1").unwrap();
    sheet.write_number(1, 2, 101.0).unwrap();
    sheet.write_number(1, 3, 1234.5678).unwrap();
    sheet.write_number(1, 8, 0.123456789).unwrap();
    workbook.save(&path).unwrap();

    let table = read_workbook(&path, None).unwrap();
    let result = convert(&table, &ConvertSettings::default()).unwrap();

    let output = result.output_text();
    assert!(output.starts_with("LOADCNLC1\nLOAD   101     1234.57"));
    assert_eq!(
        result.log_text().unwrap(),
        "Rounded Values:\n\
         '1234.5678' was rounded to '1234.57'\n\
         '0.123456789' was rounded to '0.12346'"
    );
}

#[test]
fn missing_moment_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Load Condition", "Load ID", "Joint Name", "FORCE(X)"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let table = read_workbook(&path, None).unwrap();
    let err = convert(&table, &ConvertSettings::default()).unwrap_err();
    assert_eq!(
        err,
        GenError::column_not_found("FORCE(Y)", vec!["force(y)".to_string()])
    );
}
