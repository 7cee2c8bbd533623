//! Fixed-width field formatting for SACS load cards.
//!
//! Every force and moment on a `LOAD` card occupies exactly seven columns.
//! Values that already fit are copied through unchanged; longer values lose
//! fractional digits one at a time until they fit, and the loss is reported as
//! a [`RoundingLogEntry`]. The formatter keeps no state: each call returns the
//! field text together with whatever needs logging.
//!
//! # Example
//! ```
//! use loadgen_core::sacs::fields::format_numeric;
//!
//! let field = format_numeric("1234.5678");
//! assert_eq!(field.text, "1234.57");
//! assert_eq!(
//!     field.rounding.unwrap().to_string(),
//!     "'1234.5678' was rounded to '1234.57'"
//! );
//!
//! assert_eq!(format_numeric("-12.5").text, "  -12.5");
//! assert_eq!(format_numeric("nan").text, "    0.0");
//! ```

use serde::{Deserialize, Serialize};

use crate::table::CellValue;

/// Width of every numeric field on a load card
pub const NUMERIC_WIDTH: usize = 7;

/// Width the load ID is padded to
pub const LOAD_ID_WIDTH: usize = 8;

/// Most fractional digits tried when shrinking a value
pub const MAX_PRECISION: usize = 6;

/// Field written for blank, `nan` and unparseable cells
pub const ZERO_FIELD: &str = "    0.0";

/// A value that lost precision to fit its field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingLogEntry {
    /// Value as it appeared in the sheet (whitespace trimmed)
    pub original: String,
    /// Value as written to the card
    pub rounded: String,
}

impl std::fmt::Display for RoundingLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' was rounded to '{}'", self.original, self.rounded)
    }
}

/// Result of formatting one numeric cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedField {
    /// Exactly [`NUMERIC_WIDTH`] characters, right-justified
    pub text: String,
    /// Set when the written value differs from the input
    pub rounding: Option<RoundingLogEntry>,
    /// Set when the input was not a number and [`ZERO_FIELD`] was written
    pub unparseable: bool,
}

impl FormattedField {
    fn exact(text: String) -> Self {
        FormattedField {
            text,
            rounding: None,
            unparseable: false,
        }
    }

    fn placeholder() -> Self {
        FormattedField {
            text: ZERO_FIELD.to_string(),
            rounding: None,
            unparseable: true,
        }
    }
}

/// Format a spreadsheet cell as a numeric field.
pub fn format_cell(cell: &CellValue) -> FormattedField {
    format_numeric(&cell.numeric_repr())
}

/// Format the text of a numeric cell into a 7-character field.
///
/// - blank or `nan` (any case) is zero
/// - anything up to 7 characters that parses is kept verbatim
/// - longer numbers are shrunk by [`reduce_to_width`] and logged if changed
/// - text that is not a finite number becomes [`ZERO_FIELD`]
pub fn format_numeric(raw: &str) -> FormattedField {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return FormattedField::exact(ZERO_FIELD.to_string());
    }

    let value = match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return FormattedField::placeholder(),
    };

    if trimmed.chars().count() <= NUMERIC_WIDTH {
        return FormattedField::exact(right_justify(trimmed, NUMERIC_WIDTH));
    }

    let rounded = reduce_to_width(value);
    let rounding = (rounded != trimmed).then(|| RoundingLogEntry {
        original: trimmed.to_string(),
        rounded: rounded.clone(),
    });

    FormattedField {
        text: right_justify(&rounded, NUMERIC_WIDTH),
        rounding,
        unparseable: false,
    }
}

/// Shortest-loss rendering of `value` in at most 7 characters (unpadded).
///
/// Tries 6 down to 0 fractional digits and returns the first rendering that
/// fits, with trailing zeros and a dangling decimal point removed. Values too
/// large even as whole numbers are cut to their leading 7 characters.
pub fn reduce_to_width(value: f64) -> String {
    for precision in (0..=MAX_PRECISION).rev() {
        let rendered = render_fixed(value, precision);
        if rendered.chars().count() <= NUMERIC_WIDTH {
            return rendered;
        }
    }
    render_fixed(value, 0).chars().take(NUMERIC_WIDTH).collect()
}

/// `value` with `precision` fractional digits, trailing zeros stripped.
pub fn render_fixed(value: f64, precision: usize) -> String {
    let mut rendered = format!("{:.*}", precision, value);
    if rendered.contains('.') {
        let trimmed_len = rendered.trim_end_matches('0').trim_end_matches('.').len();
        rendered.truncate(trimmed_len);
    }
    if rendered == "-0" {
        rendered.remove(0);
    }
    rendered
}

/// Load ID, left-justified in [`LOAD_ID_WIDTH`] columns.
pub fn format_load_id(load_id: &str) -> String {
    format!("{:<width$}", load_id, width = LOAD_ID_WIDTH)
}

fn right_justify(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}
