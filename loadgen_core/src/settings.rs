//! # Conversion Settings
//!
//! Options that change how a workbook is read and what gets reported. All
//! fields have defaults, so an empty JSON object (or no settings file at all)
//! reproduces the stock behaviour.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "sheet": "Joint Loads",
//!   "unparseable": "report",
//!   "column_keywords": {
//!     "joint_name": ["node"],
//!     "load_id": ["id"]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{GenError, GenResult};
use crate::sacs::columns::{ColumnKeywords, LoadField};

/// What to do with numeric cells that are not numbers.
///
/// Either way the card gets `0.0` in that field and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnparseablePolicy {
    /// Write zero and say nothing
    #[default]
    Silent,
    /// Write zero, emit a warning and list the cell in the log artifact
    Report,
}

impl UnparseablePolicy {
    /// Short name as used in settings files and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            UnparseablePolicy::Silent => "silent",
            UnparseablePolicy::Report => "report",
        }
    }
}

impl std::fmt::Display for UnparseablePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Settings for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    /// Worksheet to read; the first sheet when unset
    pub sheet: Option<String>,

    /// Handling of non-numeric force/moment cells
    pub unparseable: UnparseablePolicy,

    /// Replacement keywords for individual fields
    pub column_keywords: BTreeMap<LoadField, Vec<String>>,
}

impl ConvertSettings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> GenResult<Self> {
        serde_json::from_str(json).map_err(|e| GenError::SerializationError {
            reason: format!("Invalid settings: {}", e),
        })
    }

    /// Select a worksheet (builder pattern)
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Set the unparseable-value policy (builder pattern)
    pub fn with_unparseable(mut self, policy: UnparseablePolicy) -> Self {
        self.unparseable = policy;
        self
    }

    /// Keyword table with this file's overrides applied
    pub fn keywords(&self) -> GenResult<ColumnKeywords> {
        ColumnKeywords::from_overrides(&self.column_keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConvertSettings::default();
        assert_eq!(settings.sheet, None);
        assert_eq!(settings.unparseable, UnparseablePolicy::Silent);
        assert_eq!(settings.keywords().unwrap(), ColumnKeywords::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ConvertSettings::from_json("{}").unwrap(), ConvertSettings::default());
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "sheet": "Joint Loads",
            "unparseable": "report",
            "column_keywords": { "joint_name": ["Node"] }
        }"#;
        let settings = ConvertSettings::from_json(json).unwrap();
        assert_eq!(settings.sheet.as_deref(), Some("Joint Loads"));
        assert_eq!(settings.unparseable, UnparseablePolicy::Report);
        let keywords = settings.keywords().unwrap();
        assert_eq!(keywords.get(LoadField::JointName), ["node".to_string()]);
        assert_eq!(keywords.get(LoadField::LoadId), ["load".to_string(), "id".to_string()]);
    }

    #[test]
    fn test_bad_json() {
        let err = ConvertSettings::from_json(r#"{"unparseable": "shout"}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_builders() {
        let settings = ConvertSettings::default()
            .with_sheet("Loads")
            .with_unparseable(UnparseablePolicy::Report);
        assert_eq!(settings.sheet.as_deref(), Some("Loads"));
        assert_eq!(settings.unparseable.to_string(), "report");
    }
}
