//! Spreadsheet access. The batch only ever needs two things from a table:
//! how many rows the sheet declares, and the display text of a cell.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::error::{PrepError, PrepResult};

/// Read-only view of a worksheet addressed with 1-based `(row, column)`
/// coordinates, the way the sheet shows them to a user.
pub trait CellGrid {
    /// 1-based index of the last row the sheet declares; 0 when empty. A
    /// sheet with no cells at all is not an error, it just has no data rows.
    fn last_row(&self) -> u32;

    /// Display text of a cell. Cells outside the used area read as "".
    fn cell_text(&self, row: u32, column: u32) -> PrepResult<String>;
}

/// The first worksheet of a workbook, fully loaded.
#[derive(Debug, Clone)]
pub struct Worksheet {
    range: Range<Data>,
}

impl Worksheet {
    /// Load the first worksheet of the `.xlsx` at `path`. The file handle is
    /// released before this returns.
    pub fn open_first(path: &Path) -> PrepResult<Self> {
        let mut workbook = open_workbook::<Xlsx<_>, _>(path)
            .map_err(|error| PrepError::workbook(path, error))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PrepError::EmptyWorkbook(path.to_path_buf()))?
            .map_err(|error| PrepError::workbook(path, error))?;
        tracing::debug!(
            stage = "table",
            path = %path.display(),
            rows = range.end().map_or(0, |(row, _)| row + 1),
            "loaded first worksheet"
        );
        Ok(Self { range })
    }

    #[must_use]
    pub fn from_range(range: Range<Data>) -> Self {
        Self { range }
    }
}

impl CellGrid for Worksheet {
    fn last_row(&self) -> u32 {
        if self.range.is_empty() {
            return 0;
        }
        self.range.end().map_or(0, |(row, _)| row + 1)
    }

    fn cell_text(&self, row: u32, column: u32) -> PrepResult<String> {
        if row == 0 || column == 0 {
            return Ok(String::new());
        }
        match self.range.get_value((row - 1, column - 1)) {
            Some(data) => data_text(data).map_err(|detail| PrepError::Cell {
                row,
                column,
                detail,
            }),
            None => Ok(String::new()),
        }
    }
}

/// Render a cell roughly as Excel's General format would show it. Error
/// cells come back as `Err` with the Excel error literal.
fn data_text(data: &Data) -> Result<String, String> {
    let text = match data {
        Data::Empty => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            value.clone()
        }
        Data::Int(value) => value.to_string(),
        Data::Float(value) => general_number(*value),
        Data::Bool(true) => "TRUE".to_owned(),
        Data::Bool(false) => "FALSE".to_owned(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(stamp) if stamp.time() == chrono::NaiveTime::MIN => {
                stamp.format("%Y-%m-%d").to_string()
            }
            Some(stamp) => stamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => data.to_string(),
        },
        Data::Error(error) => return Err(error.to_string()),
    };
    Ok(text)
}

/// Excel "General" rendering of a number: 15 significant digits, no
/// trailing zeros, scientific notation (`1E+20`, `1E-07`) once the decimal
/// exponent leaves `-5..15`.
fn general_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // `{:.14e}` rounds to 15 significant digits: "d.dddddddddddddde<exp>".
    let scientific = format!("{value:.14e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if !(-5..15).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}E{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = usize::try_from(14 - exponent).unwrap_or(0);
    trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
