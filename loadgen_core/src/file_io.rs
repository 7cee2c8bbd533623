//! # File I/O Module
//!
//! Writes the conversion artifacts with atomic replace semantics: each file is
//! written to `<file>.tmp`, synced, and renamed over the target, so a reader
//! never sees a half-written deck.
//!
//! [`write_artifacts`] stages the deck and the rounding log before touching
//! either target. The log is put in place (or an old one removed) first, and
//! the deck is only replaced once that has succeeded.
//!
//! ## Example
//!
//! ```rust,no_run
//! use loadgen_core::convert::convert;
//! use loadgen_core::file_io::write_artifacts;
//! use loadgen_core::settings::ConvertSettings;
//! use loadgen_core::workbook::read_workbook;
//! use std::path::Path;
//!
//! let table = read_workbook(Path::new("loads.xlsx"), None)?;
//! let result = convert(&table, &ConvertSettings::default())?;
//! let written = write_artifacts(
//!     &result,
//!     Path::new("sacs_output.txt"),
//!     Path::new("rounding_log.txt"),
//! )?;
//! println!("wrote {}", written.output.display());
//! # Ok::<(), loadgen_core::errors::GenError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::convert::Conversion;
use crate::errors::{GenError, GenResult};
use crate::settings::ConvertSettings;

/// `<file>.tmp` next to the target
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `<path>.tmp` and sync it. Returns the temp path.
///
/// The temp file is removed if the write fails.
fn stage_text(path: &Path, contents: &str) -> GenResult<PathBuf> {
    let tmp_path = tmp_path_for(path);
    let result = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });

    match result {
        Ok(()) => Ok(tmp_path),
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(GenError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))
        }
    }
}

/// Rename a staged file over its target, removing it if the rename fails.
fn commit_staged(tmp_path: &Path, path: &Path) -> GenResult<()> {
    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        GenError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Write text with atomic replace semantics.
///
/// 1. Write to `<file>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
///
/// The temp file is removed if any step fails.
pub fn write_text_atomic(path: &Path, contents: &str) -> GenResult<()> {
    let tmp_path = stage_text(path, contents)?;
    commit_staged(&tmp_path, path)
}

/// Files produced by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifacts {
    /// The SACS load deck
    pub output: PathBuf,
    /// The rounding log, when there was anything to log
    pub log: Option<PathBuf>,
}

/// Write the load deck and, if needed, the rounding log.
///
/// When there is nothing to log, a log left by an earlier run is removed. If
/// the log cannot be written or removed, the existing deck is left untouched
/// and no temp files remain.
pub fn write_artifacts(conversion: &Conversion, output_path: &Path, log_path: &Path) -> GenResult<WrittenArtifacts> {
    let deck_tmp = stage_text(output_path, &conversion.output_text())?;

    let log = match settle_log(conversion, log_path) {
        Ok(log) => log,
        Err(e) => {
            let _ = fs::remove_file(&deck_tmp);
            return Err(e);
        }
    };

    commit_staged(&deck_tmp, output_path)?;
    info!(path = %output_path.display(), lines = conversion.lines.len(), "wrote load deck");

    Ok(WrittenArtifacts {
        output: output_path.to_path_buf(),
        log,
    })
}

/// Put the current log in place, or clear the previous run's.
fn settle_log(conversion: &Conversion, log_path: &Path) -> GenResult<Option<PathBuf>> {
    match conversion.log_text() {
        Some(text) => {
            write_text_atomic(log_path, &text)?;
            info!(path = %log_path.display(), "wrote rounding log");
            Ok(Some(log_path.to_path_buf()))
        }
        None => {
            if log_path.exists() {
                fs::remove_file(log_path).map_err(|e| {
                    GenError::file_error("remove stale log", log_path.display().to_string(), e.to_string())
                })?;
                debug!(path = %log_path.display(), "removed rounding log from an earlier run");
            }
            Ok(None)
        }
    }
}

/// Load conversion settings from a JSON file.
pub fn load_settings(path: &Path) -> GenResult<ConvertSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| GenError::file_error("read settings", path.display().to_string(), e.to_string()))?;
    ConvertSettings::from_json(&contents)
}
