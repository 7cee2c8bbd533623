//! # Workbook I/O
//!
//! Reads a load sheet from an Excel/OpenDocument file into an
//! [`InputTable`], and writes the sample workbook users start from.
//!
//! Reading accepts anything calamine auto-detects (xlsx, xlsm, xls, xlsb,
//! ods). The first row of the sheet's used range is the header row.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::debug;

use crate::errors::{GenError, GenResult};
use crate::sacs::columns::LoadField;
use crate::table::{CellValue, InputTable};

/// Default file name of the sample workbook
pub const TEMPLATE_FILE_NAME: &str = "SACS_Load_Sample.xlsx";

/// Sheet name used by the sample workbook
pub const TEMPLATE_SHEET_NAME: &str = "Joint Loads";

/// Read one worksheet into a table.
///
/// # Arguments
///
/// * `path` - Workbook file
/// * `sheet` - Worksheet name; the first sheet when `None`
///
/// # Returns
///
/// * `Err(GenError::WorkbookError)` - File cannot be opened or decoded
/// * `Err(GenError::SheetNotFound)` - `sheet` is not in the workbook
/// * `Err(GenError::EmptyWorkbook)` - No sheets, or the sheet is blank
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> GenResult<InputTable> {
    let display = path.display().to_string();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| GenError::workbook_error(&display, format!("Failed to open: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| GenError::sheet_not_found(name, sheet_names.clone()))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| GenError::EmptyWorkbook { path: display.clone() })?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        GenError::workbook_error(&display, format!("Failed to read sheet '{}': {}", sheet_name, e))
    })?;

    let (height, width) = range.get_size();
    debug!(sheet = %sheet_name, rows = height, columns = width, "read worksheet");

    table_from_range(&range).ok_or(GenError::EmptyWorkbook { path: display })
}

/// Split a cell range into header and data rows.
///
/// Returns `None` for an empty range.
pub fn table_from_range(range: &Range<Data>) -> Option<InputTable> {
    let mut rows = range.rows();
    let header = rows.next()?;

    let mut table = InputTable::new(header.iter().map(|cell| cell_value(cell).as_text()));
    for row in rows {
        table.push_row(row.iter().map(cell_value).collect());
    }
    Some(table)
}

/// Map a calamine cell to a [`CellValue`].
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Integer(*n),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

/// One example row of the sample workbook.
struct TemplateRow {
    condition: &'static str,
    load_id: &'static str,
    joint: &'static str,
    values: [f64; 6],
}

const TEMPLATE_ROWS: &[TemplateRow] = &[
    TemplateRow { condition: "DL", load_id: "DECK", joint: "0101", values: [0.0, 0.0, -12.5, 0.0, 0.0, 0.0] },
    TemplateRow { condition: "", load_id: "DECK", joint: "0102", values: [0.0, 0.0, -12.5, 0.0, 0.0, 0.0] },
    TemplateRow { condition: "", load_id: "CRANE", joint: "0103", values: [0.0, 0.0, -45.25, 3.5, 0.0, 0.0] },
    TemplateRow { condition: "WX", load_id: "WIND", joint: "0101", values: [8.75, 0.0, 0.0, 0.0, 0.0, 1.2] },
    TemplateRow { condition: "", load_id: "WIND", joint: "0102", values: [8.75, 0.0, 0.0, 0.0, 0.0, 1.2] },
];

/// Write the sample workbook.
///
/// The sheet has the nine standard headers, a few rows showing a condition
/// carried down to the rows below it, and a blank separator row between
/// conditions.
pub fn write_template(path: &Path) -> GenResult<()> {
    build_template(path)
        .map_err(|e| GenError::file_error("write template", path.display().to_string(), e.to_string()))
}

fn build_template(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(TEMPLATE_SHEET_NAME)?;

    for (col, field) in LoadField::ALL.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, field.label(), &header_format)?;
        sheet.set_column_width(col, 14)?;
    }

    let mut row: u32 = 1;
    for example in TEMPLATE_ROWS {
        if !example.condition.is_empty() && row > 1 {
            // blank separator row between conditions
            row += 1;
        }
        if !example.condition.is_empty() {
            sheet.write_string(row, 0, example.condition)?;
        }
        sheet.write_string(row, 1, example.load_id)?;
        sheet.write_string(row, 2, example.joint)?;
        for (i, value) in example.values.iter().enumerate() {
            sheet.write_number(row, 3 + i as u16, *value)?;
        }
        row += 1;
    }

    workbook.save(path)?;
    debug!(path = %path.display(), rows = row - 1, "wrote template workbook");
    Ok(())
}
