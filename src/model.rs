use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Per-row results
// ---------------------------------------------------------------------------

/// What happened to the audio side of a single table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowOutcome {
    /// The source clip existed and was copied under its ordinal name.
    Copied {
        source: PathBuf,
        destination: PathBuf,
    },
    /// The referenced clip does not exist; the transcript line is still
    /// written.
    MissingSource { source: PathBuf },
    /// Reading a cell, copying, or writing the line failed. No transcript
    /// line was written for this row.
    Failed { reason: String },
}

impl RowOutcome {
    #[must_use]
    pub const fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::MissingSource { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    /// 1-based worksheet row index (row 1 is the header).
    pub row_index: u32,
    /// Ordinal output name, e.g. `0001.wav` for row 2.
    pub file_name: String,
    pub transcript_written: bool,
    pub outcome: RowOutcome,
}

// ---------------------------------------------------------------------------
// Whole-batch results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub table_file: PathBuf,
    pub transcript_file: PathBuf,
    pub rows: Vec<RowRecord>,
}

impl BatchReport {
    #[must_use]
    pub fn copied(&self) -> usize {
        self.rows.iter().filter(|row| row.outcome.is_copied()).count()
    }

    #[must_use]
    pub fn missing(&self) -> usize {
        self.rows.iter().filter(|row| row.outcome.is_missing()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.rows.iter().filter(|row| row.outcome.is_failed()).count()
    }

    #[must_use]
    pub fn lines_written(&self) -> usize {
        self.rows.iter().filter(|row| row.transcript_written).count()
    }
}

/// Result of the fallible core, before run-level errors are folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    NoTableFile { output_dir: PathBuf },
    Completed(BatchReport),
}

/// Everything a single invocation can end in. Never an `Err`: the
/// processor's `run` folds every failure into one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchRun {
    InvalidInput { input: String },
    NoTableFile { output_dir: PathBuf },
    Completed(BatchReport),
    Failed { code: String, message: String },
}

impl From<BatchOutcome> for BatchRun {
    fn from(outcome: BatchOutcome) -> Self {
        match outcome {
            BatchOutcome::NoTableFile { output_dir } => Self::NoTableFile { output_dir },
            BatchOutcome::Completed(report) => Self::Completed(report),
        }
    }
}
