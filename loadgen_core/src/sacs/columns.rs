//! Column resolution: header text → semantic load fields.
//!
//! Headers are matched by keywords rather than exact names, so
//! `"Load Condition"`, `"LOAD CONDITION (LC)"` and `"loadcondition"` all find
//! the same field. Both sides are normalized first: lowercase, every
//! whitespace character removed. A header matches a field when it contains
//! every keyword of that field; the leftmost matching header wins.
//!
//! # Example
//! ```
//! use loadgen_core::sacs::columns::{resolve_columns, ColumnKeywords, LoadField};
//!
//! let headers: Vec<String> = [
//!     "Joint Name", "Load ID", "Load Condition",
//!     "FORCE(X)", "FORCE(Y)", "FORCE(Z)",
//!     "MOMENT(X)", "MOMENT(Y)", "MOMENT(Z)",
//! ].iter().map(|s| s.to_string()).collect();
//!
//! let map = resolve_columns(&headers, &ColumnKeywords::default()).unwrap();
//! assert_eq!(map.get(LoadField::LoadCondition), 2);
//! assert_eq!(map.get(LoadField::JointName), 0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{GenError, GenResult};

/// The nine semantic columns a load sheet must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadField {
    /// Load condition (load case) name, carried down to following rows
    LoadCondition,
    /// Load identifier written at the end of each load card
    LoadId,
    /// Joint receiving the load
    JointName,
    /// Global X force
    ForceX,
    /// Global Y force
    ForceY,
    /// Global Z force
    ForceZ,
    /// Global X moment
    MomentX,
    /// Global Y moment
    MomentY,
    /// Global Z moment
    MomentZ,
}

impl LoadField {
    /// All fields in card order
    pub const ALL: [LoadField; 9] = [
        LoadField::LoadCondition,
        LoadField::LoadId,
        LoadField::JointName,
        LoadField::ForceX,
        LoadField::ForceY,
        LoadField::ForceZ,
        LoadField::MomentX,
        LoadField::MomentY,
        LoadField::MomentZ,
    ];

    /// The six numeric components, in the order they appear on a load card
    pub const COMPONENTS: [LoadField; 6] = [
        LoadField::ForceX,
        LoadField::ForceY,
        LoadField::ForceZ,
        LoadField::MomentX,
        LoadField::MomentY,
        LoadField::MomentZ,
    ];

    /// Header text used by the sample workbook
    pub fn label(&self) -> &'static str {
        match self {
            LoadField::LoadCondition => "Load Condition",
            LoadField::LoadId => "Load ID",
            LoadField::JointName => "Joint Name",
            LoadField::ForceX => "FORCE(X)",
            LoadField::ForceY => "FORCE(Y)",
            LoadField::ForceZ => "FORCE(Z)",
            LoadField::MomentX => "MOMENT(X)",
            LoadField::MomentY => "MOMENT(Y)",
            LoadField::MomentZ => "MOMENT(Z)",
        }
    }

    /// Keywords that must all appear in the header for this field
    pub fn default_keywords(&self) -> &'static [&'static str] {
        match self {
            LoadField::LoadCondition => &["load", "condition"],
            LoadField::LoadId => &["load", "id"],
            LoadField::JointName => &["joint", "name"],
            LoadField::ForceX => &["force(x)"],
            LoadField::ForceY => &["force(y)"],
            LoadField::ForceZ => &["force(z)"],
            LoadField::MomentX => &["moment(x)"],
            LoadField::MomentY => &["moment(y)"],
            LoadField::MomentZ => &["moment(z)"],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for LoadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lowercase and drop all whitespace.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keyword table for all nine fields, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnKeywords {
    table: BTreeMap<LoadField, Vec<String>>,
}

impl Default for ColumnKeywords {
    fn default() -> Self {
        let table = LoadField::ALL
            .iter()
            .map(|field| {
                let keywords = field.default_keywords().iter().map(|k| normalize(k)).collect();
                (*field, keywords)
            })
            .collect();
        ColumnKeywords { table }
    }
}

impl ColumnKeywords {
    /// Default table with per-field replacements applied.
    ///
    /// An override must leave at least one non-blank keyword, otherwise it
    /// would match any header.
    pub fn from_overrides(overrides: &BTreeMap<LoadField, Vec<String>>) -> GenResult<Self> {
        let mut keywords = ColumnKeywords::default();
        for (field, words) in overrides {
            keywords = keywords.with_override(*field, words)?;
        }
        Ok(keywords)
    }

    /// Replace the keywords of one field (builder pattern)
    pub fn with_override<S: AsRef<str>>(mut self, field: LoadField, words: &[S]) -> GenResult<Self> {
        let normalized: Vec<String> = words
            .iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        if normalized.is_empty() {
            return Err(GenError::invalid_input(
                format!("column_keywords.{}", field.label()),
                "[]",
                "At least one non-blank keyword is required",
            ));
        }
        self.table.insert(field, normalized);
        Ok(self)
    }

    /// Normalized keywords for a field
    pub fn get(&self, field: LoadField) -> &[String] {
        self.table.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Index of the first header containing every keyword.
///
/// `keywords` must already be normalized.
pub fn find_column(headers: &[String], keywords: &[String]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = normalize(header);
        keywords.iter().all(|k| header.contains(k.as_str()))
    })
}

/// Column position of every [`LoadField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIndexMap {
    columns: [usize; 9],
}

impl FieldIndexMap {
    /// Column index for a field
    pub fn get(&self, field: LoadField) -> usize {
        self.columns[field.slot()]
    }

    /// `(field, column)` pairs in card order
    pub fn iter(&self) -> impl Iterator<Item = (LoadField, usize)> + '_ {
        LoadField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

/// Resolve all nine fields against a header row.
///
/// Fails on the first field with no matching header; nothing is returned
/// for the fields that did match.
pub fn resolve_columns(headers: &[String], keywords: &ColumnKeywords) -> GenResult<FieldIndexMap> {
    let mut columns = [0usize; 9];
    for field in LoadField::ALL {
        let words = keywords.get(field);
        let col = find_column(headers, words)
            .ok_or_else(|| GenError::column_not_found(field.label(), words.to_vec()))?;
        debug!(field = field.label(), column = col, header = %headers[col], "resolved column");
        columns[field.slot()] = col;
    }
    Ok(FieldIndexMap { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn standard_headers() -> Vec<String> {
        headers(&[
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

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Load\tCondition \n"), "loadcondition");
        assert_eq!(normalize("FORCE (X)"), "force(x)");
    }

    #[test]
    fn test_standard_headers_resolve_in_order() {
        let map = resolve_columns(&standard_headers(), &ColumnKeywords::default()).unwrap();
        for (i, field) in LoadField::ALL.iter().enumerate() {
            assert_eq!(map.get(*field), i);
        }
    }

    #[test]
    fn test_resolution_ignores_column_order_and_spacing() {
        let h = headers(&[
            "moment (z)",
            "Force (X) [kN]",
            "JOINT NAME",
            "Force(Y)",
            "Force(Z)",
            "Moment(X)",
            "Moment(Y)",
            "Load   ID",
            "LoadCondition",
        ]);
        let map = resolve_columns(&h, &ColumnKeywords::default()).unwrap();
        assert_eq!(map.get(LoadField::MomentZ), 0);
        assert_eq!(map.get(LoadField::ForceX), 1);
        assert_eq!(map.get(LoadField::LoadId), 7);
        assert_eq!(map.get(LoadField::LoadCondition), 8);
    }

    #[test]
    fn test_first_match_wins() {
        let h = headers(&["Joint Name (old)", "Joint Name"]);
        let words = ColumnKeywords::default();
        assert_eq!(find_column(&h, words.get(LoadField::JointName)), Some(0));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let mut h = standard_headers();
        h.retain(|name| name != "MOMENT(Y)");
        let err = resolve_columns(&h, &ColumnKeywords::default()).unwrap_err();
        assert_eq!(
            err,
            GenError::column_not_found("MOMENT(Y)", vec!["moment(y)".to_string()])
        );
        assert_eq!(err.to_string(), "Column not found matching: moment(y)");
    }

    #[test]
    fn test_all_keywords_required() {
        // "Load" alone is not enough for Load Condition
        let h = headers(&["Load", "Condition"]);
        let words = ColumnKeywords::default();
        assert_eq!(find_column(&h, words.get(LoadField::LoadCondition)), None);
    }

    #[test]
    fn test_keyword_override() {
        let mut overrides = BTreeMap::new();
        overrides.insert(LoadField::JointName, vec!["Node".to_string()]);
        let words = ColumnKeywords::from_overrides(&overrides).unwrap();
        assert_eq!(words.get(LoadField::JointName), ["node".to_string()]);

        let h = headers(&["Node ID"]);
        assert_eq!(find_column(&h, words.get(LoadField::JointName)), Some(0));
    }

    #[test]
    fn test_blank_override_rejected() {
        let result = ColumnKeywords::default().with_override(LoadField::LoadId, &["  "]);
        assert!(matches!(result, Err(GenError::InvalidInput { .. })));
    }

    #[test]
    fn test_field_serialization() {
        let json = serde_json::to_string(&LoadField::ForceX).unwrap();
        assert_eq!(json, "\"force_x\"");
        let parsed: LoadField = serde_json::from_str("\"load_condition\"").unwrap();
        assert_eq!(parsed, LoadField::LoadCondition);
    }
}
