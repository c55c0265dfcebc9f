//! Folder conventions: where outputs go, what they are called, and which
//! spreadsheet in the input folder gets read.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepError, PrepResult};

pub const OUTPUT_DIR_NAME: &str = "output";
pub const TRANSCRIPT_FILE_NAME: &str = "output.txt";
pub const ERROR_LOG_FILE_NAME: &str = "error.log";
pub const TABLE_EXTENSION: &str = "xlsx";
pub const AUDIO_EXTENSION: &str = "wav";

/// Excel drops `~$name.xlsx` owner files next to any open workbook.
const LOCK_FILE_PREFIX: &str = "~$";

/// Accept a raw user-supplied folder path. Blank input and anything that is
/// not an existing directory are rejected before any side effect.
pub fn validate_input_dir(raw: &str) -> PrepResult<PathBuf> {
    if raw.trim().is_empty() {
        return Err(PrepError::InvalidInput("folder path is empty".to_owned()));
    }
    let path = PathBuf::from(raw);
    if !path.is_dir() {
        return Err(PrepError::InvalidInput(format!(
            "folder does not exist: {}",
            path.display()
        )));
    }
    Ok(path)
}

#[must_use]
pub fn output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join(OUTPUT_DIR_NAME)
}

#[must_use]
pub fn transcript_path(output_dir: &Path) -> PathBuf {
    output_dir.join(TRANSCRIPT_FILE_NAME)
}

#[must_use]
pub fn error_log_path(output_dir: &Path) -> PathBuf {
    output_dir.join(ERROR_LOG_FILE_NAME)
}

/// Output name for a worksheet row: row 2 becomes `0001.wav`. Ordinals past
/// 9999 simply widen.
#[must_use]
pub fn ordinal_file_name(row_index: u32) -> String {
    format!("{:04}.{AUDIO_EXTENSION}", row_index.saturating_sub(1))
}

/// Pick the spreadsheet to read: the first `.xlsx` directly inside
/// `input_dir`, by file name. Subdirectories and Excel lock files are
/// ignored.
pub fn discover_table_file(input_dir: &Path) -> PrepResult<Option<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_table_file(&path) {
            candidates.push(path);
        }
    }
    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(
        stage = "discover",
        candidates = candidates.len(),
        "scanned input folder for tables"
    );
    Ok(candidates.into_iter().next())
}

fn is_table_file(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TABLE_EXTENSION));
    let is_lock_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOCK_FILE_PREFIX));
    has_extension && !is_lock_file
}
