//! # Input Table
//!
//! The in-memory form of one worksheet: a header row plus data rows of raw
//! cell values. Built once per conversion (by [`crate::workbook`] or by hand
//! in tests) and only read afterwards.
//!
//! ## Example
//!
//! ```rust
//! use loadgen_core::table::{CellValue, InputTable};
//!
//! let table = InputTable::new(["Joint Name", "FORCE(X)"])
//!     .with_row(vec!["101".into(), 12.5.into()]);
//!
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.cell(0, 1), &CellValue::Number(12.5));
//! assert_eq!(table.cell(0, 7), &CellValue::Empty);
//! ```

use serde::{Deserialize, Serialize};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A raw spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    /// Blank cell
    Empty,
    /// Text as typed by the user (untrimmed)
    Text(String),
    /// Floating point number (Excel stores all numbers this way)
    Number(f64),
    /// Integer (CSV-like sources, some xls encodings)
    Integer(i64),
}

impl CellValue {
    /// True for blank cells, NaN, and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Integer(_) => false,
        }
    }

    /// Render the cell as an identifier (load condition, load ID, joint name).
    ///
    /// Whole numbers print without a decimal point, so a joint typed as `101`
    /// stays `101` even though the workbook stores it as a float.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(n) if n.is_nan() => String::new(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => format!("{}", n),
        }
    }

    /// The direct decimal string of a numeric cell, before any width handling.
    ///
    /// Floats keep one decimal when whole (`0.0`, `250.0`), which is what the
    /// downstream field shows for values that fit.
    pub fn numeric_repr(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(n) if n.is_nan() => "nan".to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e16 => format!("{:.1}", n),
            CellValue::Number(n) => format!("{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

/// A header row plus data rows, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTable {
    /// Header text, one entry per column
    pub headers: Vec<String>,

    /// Data rows; every row has at least `headers.len()` cells
    pub rows: Vec<Vec<CellValue>>,
}

impl InputTable {
    /// Create an empty table with the given header row
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row (builder pattern)
    pub fn with_row(mut self, row: Vec<CellValue>) -> Self {
        self.push_row(row);
        self
    }

    /// Append a row, padding it with empty cells up to the header width
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), CellValue::Empty);
        }
        self.rows.push(row);
    }

    /// Cell at (row, column); out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
