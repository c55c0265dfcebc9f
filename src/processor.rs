use std::fs;
use std::path::Path;

use crate::error::{PrepError, PrepResult};
use crate::error_log::ErrorLog;
use crate::layout;
use crate::model::{BatchOutcome, BatchReport, BatchRun, RowOutcome, RowRecord};
use crate::table::{CellGrid, Worksheet};
use crate::transcript::TranscriptWriter;

/// Column holding the source clip's file name.
const SOURCE_COLUMN: u32 = 1;
/// Column holding the transcript text.
const TEXT_COLUMN: u32 = 2;
/// Row 1 is the header.
const FIRST_DATA_ROW: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Append missing clips, row failures and run failures to
    /// `output/error.log`.
    pub error_log: bool,
}

/// Turns one input folder (a spreadsheet plus audio clips) into
/// `output/0001.wav ...` and a single `output/output.txt`.
///
/// [`process`](Self::process) is the fallible core; [`run`](Self::run)
/// wraps it and folds every failure into a [`BatchRun`]. Neither touches
/// stdin or stdout.
#[derive(Debug, Clone, Default)]
pub struct FolderBatchProcessor {
    options: BatchOptions,
}

impl FolderBatchProcessor {
    #[must_use]
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    /// Validate the raw folder path and process it. Never returns an error.
    pub fn run(&self, input: &str) -> BatchRun {
        self.run_with(input, |_| {})
    }

    /// [`run`](Self::run), calling `on_row` as soon as each row is done so
    /// callers can report progress before the batch finishes.
    pub fn run_with<F: FnMut(&RowRecord)>(&self, input: &str, on_row: F) -> BatchRun {
        let input_dir = match layout::validate_input_dir(input) {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!(stage = "validate", %error, "rejected input folder");
                return BatchRun::InvalidInput {
                    input: input.to_owned(),
                };
            }
        };

        match self.process_with(&input_dir, on_row) {
            Ok(outcome) => outcome.into(),
            Err(error) => {
                tracing::error!(
                    stage = "finish",
                    code = error.error_code(),
                    %error,
                    "folder processing failed"
                );
                ErrorLog::for_output_dir(&layout::output_dir(&input_dir), self.options.error_log)
                    .record(&format!("folder processing failed: {error}"));
                BatchRun::Failed {
                    code: error.error_code().to_owned(),
                    message: error.to_string(),
                }
            }
        }
    }

    pub fn process(&self, input_dir: &Path) -> PrepResult<BatchOutcome> {
        self.process_with(input_dir, |_| {})
    }

    pub fn process_with<F: FnMut(&RowRecord)>(
        &self,
        input_dir: &Path,
        mut on_row: F,
    ) -> PrepResult<BatchOutcome> {
        if !input_dir.is_dir() {
            return Err(PrepError::InvalidInput(format!(
                "folder does not exist: {}",
                input_dir.display()
            )));
        }

        let output_dir = layout::output_dir(input_dir);
        fs::create_dir_all(&output_dir)?;

        let Some(table_file) = layout::discover_table_file(input_dir)? else {
            tracing::warn!(
                stage = "discover",
                input = %input_dir.display(),
                "no .xlsx table found"
            );
            return Ok(BatchOutcome::NoTableFile { output_dir });
        };
        tracing::info!(stage = "discover", table = %table_file.display(), "using table");

        let sheet = Worksheet::open_first(&table_file)?;
        let mut transcript = TranscriptWriter::create(&layout::transcript_path(&output_dir))?;
        let error_log = ErrorLog::for_output_dir(&output_dir, self.options.error_log);

        let rows = process_rows(
            &sheet,
            input_dir,
            &output_dir,
            &mut transcript,
            &error_log,
            &mut on_row,
        );
        let lines = transcript.lines();
        let transcript_file = transcript.finish()?;

        let report = BatchReport {
            input_dir: input_dir.to_path_buf(),
            output_dir,
            table_file,
            transcript_file,
            rows,
        };
        tracing::info!(
            stage = "finish",
            rows = report.rows.len(),
            lines,
            copied = report.copied(),
            missing = report.missing(),
            failed = report.failed(),
            "batch complete"
        );
        Ok(BatchOutcome::Completed(report))
    }
}

/// Walk every data row in order. A failing row is recorded and skipped;
/// it never stops the rows after it.
fn process_rows<G: CellGrid, F: FnMut(&RowRecord)>(
    grid: &G,
    input_dir: &Path,
    output_dir: &Path,
    transcript: &mut TranscriptWriter,
    error_log: &ErrorLog,
    on_row: &mut F,
) -> Vec<RowRecord> {
    (FIRST_DATA_ROW..=grid.last_row())
        .map(|row_index| {
            let file_name = layout::ordinal_file_name(row_index);
            let record = match process_row(
                grid,
                row_index,
                &file_name,
                input_dir,
                output_dir,
                transcript,
                error_log,
            ) {
                Ok(outcome) => RowRecord {
                    row_index,
                    file_name,
                    transcript_written: true,
                    outcome,
                },
                Err(error) => {
                    tracing::warn!(stage = "row", row = row_index, %error, "row failed");
                    error_log.record(&format!("row {row_index} failed: {error}"));
                    RowRecord {
                        row_index,
                        file_name,
                        transcript_written: false,
                        outcome: RowOutcome::Failed {
                            reason: error.to_string(),
                        },
                    }
                }
            };
            on_row(&record);
            record
        })
        .collect()
}

fn process_row<G: CellGrid>(
    grid: &G,
    row_index: u32,
    file_name: &str,
    input_dir: &Path,
    output_dir: &Path,
    transcript: &mut TranscriptWriter,
    error_log: &ErrorLog,
) -> PrepResult<RowOutcome> {
    let source_name = grid.cell_text(row_index, SOURCE_COLUMN)?;
    let text = grid.cell_text(row_index, TEXT_COLUMN)?;

    let source = input_dir.join(&source_name);
    let destination = output_dir.join(file_name);

    let outcome = if source.is_file() {
        fs::copy(&source, &destination)?;
        tracing::info!(
            stage = "row",
            row = row_index,
            source = %source.display(),
            destination = %destination.display(),
            "copied clip"
        );
        RowOutcome::Copied {
            source,
            destination,
        }
    } else {
        tracing::warn!(
            stage = "row",
            row = row_index,
            source = %source.display(),
            "audio file not found"
        );
        error_log.record(&format!(
            "row {row_index}: audio file not found - {}",
            source.display()
        ));
        RowOutcome::MissingSource { source }
    };

    transcript.write_line(&text)?;
    Ok(outcome)
}
