//! # loadgen_core - SACS Joint Load Generation Engine
//!
//! `loadgen_core` turns a spreadsheet of joint loads into the fixed-width
//! `LOADCN` / `LOAD` cards read by SACS Datagen, plus an audit log of every
//! value that had to be rounded to fit its 7-column field.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from table to lines; nothing global
//! - **Fail early**: The header row is checked before any row is read
//! - **Never lose a row silently**: Odd cells degrade to zero and can be reported
//! - **Rich Errors**: Structured, serializable error types
//!
//! ## Quick Start
//!
//! ```rust
//! use loadgen_core::{convert, ConvertSettings, InputTable};
//!
//! let table = InputTable::new([
//!     "Load Condition", "Load ID", "Joint Name",
//!     "FORCE(X)", "FORCE(Y)", "FORCE(Z)",
//!     "MOMENT(X)", "MOMENT(Y)", "MOMENT(Z)",
//! ])
//! .with_row(vec!["LC1".into(), "DECK".into(), "0101".into(), 0.0.into(), 0.0.into(), (-12.5).into()]);
//!
//! let result = convert(&table, &ConvertSettings::default()).unwrap();
//! println!("{}", result.output_text());
//! ```
//!
//! ## Modules
//!
//! - [`sacs`] - Column resolution, field formatting and card assembly
//! - [`convert`] - The end-to-end conversion and its artifacts
//! - [`table`] - In-memory worksheet representation
//! - [`workbook`] - Reading load sheets and writing the sample workbook
//! - [`settings`] - Conversion settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic artifact writes

pub mod convert;
pub mod errors;
pub mod file_io;
pub mod sacs;
pub mod settings;
pub mod table;
pub mod workbook;

// Re-export commonly used types at crate root for convenience
pub use convert::{convert, Conversion, ConversionSummary};
pub use errors::{GenError, GenResult};
pub use file_io::{load_settings, write_artifacts, write_text_atomic, WrittenArtifacts};
pub use settings::{ConvertSettings, UnparseablePolicy};
pub use table::{CellValue, InputTable};
pub use workbook::{read_workbook, write_template};
