#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod error_log;
pub mod layout;
pub mod logging;
pub mod model;
pub mod processor;
pub mod table;
pub mod transcript;

pub use error::{PrepError, PrepResult};
pub use model::{BatchOutcome, BatchReport, BatchRun, RowOutcome, RowRecord};
pub use processor::{BatchOptions, FolderBatchProcessor};
