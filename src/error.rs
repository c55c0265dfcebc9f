use std::path::PathBuf;

use thiserror::Error;

pub type PrepResult<T> = Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input folder: {0}")]
    InvalidInput(String),

    #[error("cannot read workbook `{path}`: {detail}")]
    Workbook { path: PathBuf, detail: String },

    #[error("workbook `{0}` has no worksheets")]
    EmptyWorkbook(PathBuf),

    #[error("cell ({row}, {column}) is unreadable: {detail}")]
    Cell {
        row: u32,
        column: u32,
        detail: String,
    },
}

impl PrepError {
    #[must_use]
    pub fn workbook(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        Self::Workbook {
            path: path.into(),
            detail: detail.to_string(),
        }
    }

    /// Stable, machine-readable code for every variant. Shows up in the
    /// `--json` run summary and in `error.log`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "TP-IO",
            Self::Json(_) => "TP-JSON",
            Self::InvalidInput(_) => "TP-INVALID-INPUT",
            Self::Workbook { .. } => "TP-WORKBOOK",
            Self::EmptyWorkbook(_) => "TP-EMPTY-WORKBOOK",
            Self::Cell { .. } => "TP-CELL",
        }
    }
}
