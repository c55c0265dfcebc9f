use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::error::PrepResult;
use crate::model::{BatchRun, RowOutcome, RowRecord};
use crate::processor::BatchOptions;

pub const PROMPT: &str = "Enter the folder path:";

#[derive(Debug, Parser)]
#[command(name = "train_prep")]
#[command(
    about = "Copy the clips listed in a folder's spreadsheet to output/NNNN.wav and collect their transcripts in output/output.txt"
)]
pub struct Cli {
    /// Folder to process. Prompted for on stdin when omitted.
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Also append problems to output/error.log.
    #[arg(long)]
    pub error_log: bool,

    /// Print the run summary as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    #[must_use]
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            error_log: self.error_log,
        }
    }
}

/// Ask for a folder path and read one line. Only the line terminator is
/// stripped; an empty or whitespace-only answer is left for validation to
/// reject.
pub fn prompt_for_folder<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> PrepResult<String> {
    writeln!(output, "{PROMPT}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    Ok(trimmed.to_owned())
}

/// Console line for one processed row, printed as soon as the row is done.
#[must_use]
pub fn render_row(row: &RowRecord) -> String {
    match &row.outcome {
        RowOutcome::Copied {
            source,
            destination,
        } => format!(
            "Copied and renamed: {} -> {}",
            source.display(),
            destination.display()
        ),
        RowOutcome::MissingSource { source } => {
            format!("WAV file not found: {}", source.display())
        }
        RowOutcome::Failed { reason } => format!("Row {} failed: {reason}", row.row_index),
    }
}

/// Closing console lines for a finished run. Per-row lines are not
/// repeated here; see [`render_row`].
#[must_use]
pub fn render_run(run: &BatchRun) -> Vec<String> {
    match run {
        BatchRun::InvalidInput { .. } => {
            vec!["The folder path is invalid or does not exist.".to_owned()]
        }
        BatchRun::NoTableFile { .. } => vec!["No Excel file found.".to_owned()],
        BatchRun::Failed { message, .. } => {
            vec![format!("Error while processing the folder: {message}")]
        }
        BatchRun::Completed(_) => vec!["Processing complete.".to_owned()],
    }
}

/// Write the run summary in the requested form.
pub fn emit_run<W: Write>(run: &BatchRun, json: bool, output: &mut W) -> PrepResult<()> {
    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(run)?)?;
    } else {
        for line in render_run(run) {
            writeln!(output, "{line}")?;
        }
    }
    Ok(())
}
