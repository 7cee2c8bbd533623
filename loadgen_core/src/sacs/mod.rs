//! SACS joint load cards
//!
//! The transcoder from spreadsheet rows to the fixed-width `LOADCN` / `LOAD`
//! lines read by SACS Datagen.
//!
//! # Overview
//!
//! - [`columns`] - Header keyword matching ([`LoadField`], [`resolve_columns`])
//! - [`fields`] - 7-column numeric fields and the rounding log
//! - [`records`] - Row walk, condition grouping and card layout
//!
//! # Example
//!
//! ```
//! use loadgen_core::sacs::{assemble, resolve_columns, ColumnKeywords};
//! use loadgen_core::table::{CellValue, InputTable};
//!
//! let table = InputTable::new([
//!     "Load Condition", "Load ID", "Joint Name",
//!     "FORCE(X)", "FORCE(Y)", "FORCE(Z)",
//!     "MOMENT(X)", "MOMENT(Y)", "MOMENT(Z)",
//! ])
//! .with_row(vec![
//!     "LC1".into(), "J1".into(), "101".into(),
//!     CellValue::Number(1234.5678), 0.0.into(), 0.0.into(),
//!     0.0.into(), 0.0.into(), 0.0.into(),
//! ]);
//!
//! let columns = resolve_columns(&table.headers, &ColumnKeywords::default())?;
//! let out = assemble(&table, &columns);
//!
//! assert_eq!(out.lines[0].text(), "LOADCNLC1");
//! assert!(out.lines[1].text().starts_with("LOAD   101     1234.57"));
//! # Ok::<(), loadgen_core::GenError>(())
//! ```

pub mod columns;
pub mod fields;
pub mod records;

pub use columns::{resolve_columns, ColumnKeywords, FieldIndexMap, LoadField};
pub use fields::{format_cell, format_numeric, FormattedField, RoundingLogEntry};
pub use records::{assemble, Assembly, LoadRecord, OutputLine, UnparseableCell};
