//! Load card assembly.
//!
//! Walks the data rows once, top to bottom. A non-blank Load Condition cell
//! starts a new group and emits a `LOADCN` header; the condition stays active
//! for every following row until the next non-blank one. A row with both a
//! Load ID and a Joint Name becomes one 81-column `LOAD` card. Rows missing
//! either are skipped without touching the active condition.
//!
//! Card layout (1-based columns, 4-character joint name):
//!
//! ```text
//! LOAD   JJJJ     FFFFFFFxxxxxxxzzzzzzzMMMMMMM yyyyyyyzzzzzzz GLOB JOIN   IDIDIDID
//! 1      8        17     24     31     38      46     53      61           74
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::columns::{FieldIndexMap, LoadField};
use super::fields::{format_cell, format_load_id, RoundingLogEntry};
use crate::table::{CellValue, InputTable};

/// Width every `LOAD` card is padded (or cut) to
pub const LOAD_LINE_WIDTH: usize = 81;

/// Prefix of a load condition header
pub const CONDITION_PREFIX: &str = "LOADCN";

/// One line of the generated SACS input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text")]
pub enum OutputLine {
    /// `LOADCN<condition>`, unpadded
    ConditionHeader(String),
    /// A fixed-width joint load card
    Load(String),
}

impl OutputLine {
    /// The line text
    pub fn text(&self) -> &str {
        match self {
            OutputLine::ConditionHeader(text) | OutputLine::Load(text) => text,
        }
    }

    /// Whether this is a `LOAD` card
    pub fn is_load(&self) -> bool {
        matches!(self, OutputLine::Load(_))
    }
}

impl std::fmt::Display for OutputLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// A numeric cell that was not a number and was written as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparseableCell {
    /// Worksheet row, counting the header as row 1
    pub sheet_row: usize,
    /// Column the value came from
    pub field: LoadField,
    /// Cell text as found
    pub value: String,
}

impl std::fmt::Display for UnparseableCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {}, {}: '{}' is not a number; written as 0.0",
            self.sheet_row, self.field, self.value
        )
    }
}

/// One row that qualifies for a load card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadRecord {
    /// Index of the data row (0 = first row under the header)
    pub row: usize,
    /// Condition active when the row was read
    pub condition: Option<String>,
    /// Load ID, trimmed
    pub load_id: String,
    /// Joint name, trimmed
    pub joint: String,
    /// FX, FY, FZ, MX, MY, MZ as read from the sheet
    pub components: [CellValue; 6],
}

/// A rendered card plus what formatting it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRecord {
    /// The card, exactly [`LOAD_LINE_WIDTH`] characters
    pub line: String,
    /// Values that lost precision, in card order
    pub roundings: Vec<RoundingLogEntry>,
    /// Values that were not numbers
    pub unparseable: Vec<UnparseableCell>,
    /// Set when the assembled card was longer than 81 columns and was cut
    pub truncated: bool,
}

impl LoadRecord {
    /// Build the record for a data row, or `None` if the row has no Load ID
    /// or no Joint Name.
    pub fn from_row(
        table: &InputTable,
        row: usize,
        columns: &FieldIndexMap,
        condition: Option<&str>,
    ) -> Option<Self> {
        let load_id = table.cell(row, columns.get(LoadField::LoadId)).as_text();
        let joint = table.cell(row, columns.get(LoadField::JointName)).as_text();
        if load_id.is_empty() || joint.is_empty() {
            return None;
        }

        let components = LoadField::COMPONENTS.map(|field| table.cell(row, columns.get(field)).clone());
        Some(LoadRecord {
            row,
            condition: condition.map(str::to_string),
            load_id,
            joint,
            components,
        })
    }

    /// Format the record as a `LOAD` card.
    pub fn render(&self) -> RenderedRecord {
        let mut roundings = Vec::new();
        let mut unparseable = Vec::new();
        let mut fields: Vec<String> = Vec::with_capacity(6);

        for (field, cell) in LoadField::COMPONENTS.iter().zip(self.components.iter()) {
            let formatted = format_cell(cell);
            if let Some(entry) = formatted.rounding {
                roundings.push(entry);
            }
            if formatted.unparseable {
                unparseable.push(UnparseableCell {
                    sheet_row: self.row + 2,
                    field: *field,
                    value: cell.numeric_repr().trim().to_string(),
                });
            }
            fields.push(formatted.text);
        }

        let mut line = String::with_capacity(LOAD_LINE_WIDTH);
        line.push_str("LOAD   ");
        line.push_str(&self.joint);
        line.push_str("     ");
        line.push_str(&fields[..4].concat());
        line.push(' ');
        line.push_str(&fields[4..].concat());
        line.push(' ');
        line.push_str("GLOB JOIN   ");
        line.push_str(&format_load_id(&self.load_id));

        let (line, truncated) = fit_to_width(line, LOAD_LINE_WIDTH);
        RenderedRecord {
            line,
            roundings,
            unparseable,
            truncated,
        }
    }
}

/// Everything produced by one pass over the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assembly {
    /// Output lines in row order
    pub lines: Vec<OutputLine>,
    /// Rounded values in the order they were written
    pub rounding_log: Vec<RoundingLogEntry>,
    /// Non-numeric cells that were written as zero
    pub unparseable: Vec<UnparseableCell>,
    /// Number of `LOAD` cards written
    pub load_count: usize,
    /// Number of `LOADCN` headers written
    pub condition_count: usize,
    /// Data rows that produced no card
    pub skipped_rows: usize,
    /// Cards that had to be cut to 81 columns
    pub truncated_lines: usize,
}

/// `LOADCN` header for a condition
pub fn condition_header(condition: &str) -> String {
    format!("{}{}", CONDITION_PREFIX, condition)
}

/// Pad with spaces or cut to exactly `width` characters.
///
/// Returns the line and whether anything was cut.
pub fn fit_to_width(mut line: String, width: usize) -> (String, bool) {
    let len = line.chars().count();
    if len <= width {
        line.extend(std::iter::repeat(' ').take(width - len));
        return (line, false);
    }
    (line.chars().take(width).collect(), true)
}

/// Turn every data row into output lines.
pub fn assemble(table: &InputTable, columns: &FieldIndexMap) -> Assembly {
    let mut out = Assembly::default();
    let mut current_condition: Option<String> = None;
    let condition_col = columns.get(LoadField::LoadCondition);

    for row in 0..table.row_count() {
        let condition = table.cell(row, condition_col).as_text();
        if !condition.is_empty() {
            out.lines.push(OutputLine::ConditionHeader(condition_header(&condition)));
            out.condition_count += 1;
            current_condition = Some(condition);
        }

        let Some(record) = LoadRecord::from_row(table, row, columns, current_condition.as_deref()) else {
            out.skipped_rows += 1;
            continue;
        };

        let rendered = record.render();
        if rendered.truncated {
            warn!(
                row = row + 2,
                joint = %record.joint,
                load_id = %record.load_id,
                "load card longer than {} columns was cut",
                LOAD_LINE_WIDTH
            );
            out.truncated_lines += 1;
        }
        out.rounding_log.extend(rendered.roundings);
        out.unparseable.extend(rendered.unparseable);
        out.lines.push(OutputLine::Load(rendered.line));
        out.load_count += 1;
    }

    out
}
