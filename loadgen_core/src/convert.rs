//! # Conversion
//!
//! One call turns an [`InputTable`] into the two SACS artifacts: the load
//! card text and the rounding log. Column resolution happens first and is
//! the only step that can fail; once it succeeds every row is processed.
//!
//! ## Example
//!
//! ```rust
//! use loadgen_core::convert::convert;
//! use loadgen_core::settings::ConvertSettings;
//! use loadgen_core::table::{CellValue, InputTable};
//!
//! let table = InputTable::new([
//!     "Load Condition", "Load ID", "Joint Name",
//!     "FORCE(X)", "FORCE(Y)", "FORCE(Z)",
//!     "MOMENT(X)", "MOMENT(Y)", "MOMENT(Z)",
//! ])
//! .with_row(vec!["LC2".into(), CellValue::Empty, "101".into()]);
//!
//! let result = convert(&table, &ConvertSettings::default())?;
//! assert_eq!(result.output_text(), "LOADCNLC2");
//! assert_eq!(result.log_text(), None);
//! # Ok::<(), loadgen_core::GenError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::GenResult;
use crate::sacs::columns::{resolve_columns, FieldIndexMap, LoadField};
use crate::sacs::fields::RoundingLogEntry;
use crate::sacs::records::{assemble, OutputLine, UnparseableCell};
use crate::settings::{ConvertSettings, UnparseablePolicy};
use crate::table::InputTable;

/// First line of the rounding log artifact
pub const ROUNDING_LOG_HEADER: &str = "Rounded Values:";

/// First line of the unparseable-value section of the log artifact
pub const UNPARSEABLE_LOG_HEADER: &str = "Unparseable Values:";

/// Counts describing one conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionSummary {
    /// Data rows read (header excluded)
    pub rows: usize,
    /// `LOAD` cards written
    pub load_cards: usize,
    /// `LOADCN` headers written
    pub conditions: usize,
    /// Rows that produced no card
    pub skipped_rows: usize,
    /// Values that lost precision
    pub rounded_values: usize,
    /// Non-numeric cells written as zero (counted under either policy)
    pub unparseable_values: usize,
    /// Cards cut to 81 columns
    pub truncated_lines: usize,
    /// When the conversion ran
    pub generated_at: DateTime<Utc>,
}

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    /// Header and card lines in row order
    pub lines: Vec<OutputLine>,
    /// Rounded values in card order
    pub rounding_log: Vec<RoundingLogEntry>,
    /// Non-numeric cells; only filled under [`UnparseablePolicy::Report`]
    pub unparseable: Vec<UnparseableCell>,
    /// Column each field was read from
    #[serde(skip)]
    pub columns: FieldIndexMap,
    /// Counts
    pub summary: ConversionSummary,
}

impl Conversion {
    /// Output artifact: lines joined with `\n`, no trailing newline
    pub fn output_text(&self) -> String {
        self.lines
            .iter()
            .map(OutputLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Log artifact, or `None` when nothing was rounded or reported.
    ///
    /// Rounded values come first under [`ROUNDING_LOG_HEADER`]; reported
    /// unparseable cells follow under [`UNPARSEABLE_LOG_HEADER`], separated
    /// by a blank line.
    pub fn log_text(&self) -> Option<String> {
        let mut sections = Vec::new();
        if !self.rounding_log.is_empty() {
            sections.push(render_section(ROUNDING_LOG_HEADER, &self.rounding_log));
        }
        if !self.unparseable.is_empty() {
            sections.push(render_section(UNPARSEABLE_LOG_HEADER, &self.unparseable));
        }
        if sections.is_empty() {
            None
        } else {
            Some(sections.join("\n\n"))
        }
    }
}

fn render_section<T: std::fmt::Display>(header: &str, entries: &[T]) -> String {
    let mut text = header.to_string();
    for entry in entries {
        text.push('\n');
        text.push_str(&entry.to_string());
    }
    text
}

/// Convert a table to SACS load cards.
///
/// # Errors
///
/// * `GenError::ColumnNotFound` - a field has no matching header; no output
///   is produced
/// * `GenError::InvalidInput` - a keyword override in `settings` is blank
pub fn convert(table: &InputTable, settings: &ConvertSettings) -> GenResult<Conversion> {
    let keywords = settings.keywords()?;
    let columns = resolve_columns(&table.headers, &keywords)?;

    let assembly = assemble(table, &columns);

    let unparseable_values = assembly.unparseable.len();
    let unparseable = match settings.unparseable {
        UnparseablePolicy::Silent => Vec::new(),
        UnparseablePolicy::Report => {
            for cell in &assembly.unparseable {
                warn!(row = cell.sheet_row, field = cell.field.label(), value = %cell.value, "value is not a number; written as 0.0");
            }
            assembly.unparseable
        }
    };

    let summary = ConversionSummary {
        rows: table.row_count(),
        load_cards: assembly.load_count,
        conditions: assembly.condition_count,
        skipped_rows: assembly.skipped_rows,
        rounded_values: assembly.rounding_log.len(),
        unparseable_values,
        truncated_lines: assembly.truncated_lines,
        generated_at: Utc::now(),
    };

    info!(
        rows = summary.rows,
        load_cards = summary.load_cards,
        conditions = summary.conditions,
        rounded = summary.rounded_values,
        "conversion complete"
    );

    Ok(Conversion {
        lines: assembly.lines,
        rounding_log: assembly.rounding_log,
        unparseable,
        columns,
        summary,
    })
}

/// Header text each field resolved to, in card order.
pub fn describe_columns(table: &InputTable, columns: &FieldIndexMap) -> Vec<(LoadField, String)> {
    columns
        .iter()
        .map(|(field, col)| (field, table.headers[col].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenError;
    use crate::table::CellValue;

    fn table() -> InputTable {
        InputTable::new([
            "Load Condition",
            "Load ID",
            "Joint Name",
            "FORCE(X)",
            "FORCE(Y)",
            "FORCE(Z)",
            "MOMENT(X)",
            "MOMENT(Y)",
            "MOMENT(Z)",
        ])
    }

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_reference_scenario() {
        let t = table().with_row(vec![
            "LC1".into(),
            "J1".into(),
            "101".into(),
            CellValue::Number(1234.5678),
            CellValue::Integer(0),
            CellValue::Integer(0),
            CellValue::Integer(0),
            CellValue::Integer(0),
            CellValue::Integer(0),
        ]);
        let result = convert(&t, &ConvertSettings::default()).unwrap();

        let output = result.output_text();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("LOADCNLC1"));
        let card = lines.next().unwrap();
        assert!(card.starts_with("LOAD   101     1234.57      0      0      0       0      0 GLOB JOIN   J1"));
        assert_eq!(card.len(), 81);
        assert_eq!(lines.next(), None);

        assert_eq!(
            result.log_text().unwrap(),
            "Rounded Values:\n'1234.5678' was rounded to '1234.57'"
        );
        assert_eq!(result.summary.load_cards, 1);
        assert_eq!(result.summary.rounded_values, 1);
    }

    #[test]
    fn test_missing_column_aborts() {
        let t = InputTable::new(["Load Condition", "Load ID", "Joint Name"])
            .with_row(cells(&["LC1", "A", "101"]));
        let err = convert(&t, &ConvertSettings::default()).unwrap_err();
        assert!(matches!(err, GenError::ColumnNotFound { .. }));
        assert_eq!(err.to_string(), "Column not found matching: force(x)");
    }

    #[test]
    fn test_no_log_without_rounding() {
        let t = table().with_row(cells(&["LC1", "A", "101", "1", "2", "3", "4", "5", "6"]));
        let result = convert(&t, &ConvertSettings::default()).unwrap();
        assert_eq!(result.log_text(), None);
    }

    #[test]
    fn test_unparseable_silent_by_default() {
        let t = table().with_row(cells(&["LC1", "A", "101", "oops", "", "", "", "", ""]));
        let result = convert(&t, &ConvertSettings::default()).unwrap();
        assert!(result.unparseable.is_empty());
        assert_eq!(result.summary.unparseable_values, 1);
        assert_eq!(result.log_text(), None);
        assert_eq!(&result.lines[1].text()[15..22], "    0.0");
    }

    #[test]
    fn test_unparseable_reported() {
        let t = table().with_row(cells(&["LC1", "A", "101", "oops", "", "", "", "", "0.333333333"]));
        let settings = ConvertSettings::default().with_unparseable(UnparseablePolicy::Report);
        let result = convert(&t, &settings).unwrap();

        assert_eq!(result.unparseable.len(), 1);
        assert_eq!(
            result.log_text().unwrap(),
            "Rounded Values:\n'0.333333333' was rounded to '0.33333'\n\n\
             Unparseable Values:\nrow 2, FORCE(X): 'oops' is not a number; written as 0.0"
        );
    }

    #[test]
    fn test_output_has_no_trailing_newline() {
        let t = table()
            .with_row(cells(&["LC1", "A", "101"]))
            .with_row(cells(&["LC2", "B", "102"]));
        let output = convert(&t, &ConvertSettings::default()).unwrap().output_text();
        assert_eq!(output.lines().count(), 4);
        assert!(!output.ends_with('\n'));
    }

    #[test]
    fn test_describe_columns() {
        let t = table();
        let result = convert(&t, &ConvertSettings::default()).unwrap();
        let described = describe_columns(&t, &result.columns);
        assert_eq!(described[0], (LoadField::LoadCondition, "Load Condition".to_string()));
        assert_eq!(described[8], (LoadField::MomentZ, "MOMENT(Z)".to_string()));
    }

    #[test]
    fn test_summary_serializes() {
        let t = table().with_row(cells(&["LC1", "A", "101"]));
        let result = convert(&t, &ConvertSettings::default()).unwrap();
        let json = serde_json::to_string(&result.summary).unwrap();
        assert!(json.contains("\"load_cards\":1"));
        assert!(json.contains("generated_at"));
    }
}
