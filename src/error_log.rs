//! Optional `error.log` sink next to the batch outputs. Off unless the
//! caller asks for it; writing to it never fails the batch.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::layout;

#[derive(Debug, Clone)]
pub enum ErrorLog {
    Disabled,
    File(PathBuf),
}

impl ErrorLog {
    #[must_use]
    pub fn for_output_dir(output_dir: &Path, enabled: bool) -> Self {
        if enabled {
            Self::File(layout::error_log_path(output_dir))
        } else {
            Self::Disabled
        }
    }

    /// Append a timestamped line. Failures are logged and dropped.
    pub fn record(&self, message: &str) {
        self.record_at(&Local::now(), message);
    }

    fn record_at<Tz: TimeZone>(&self, at: &DateTime<Tz>, message: &str)
    where
        Tz::Offset: std::fmt::Display,
    {
        let Self::File(path) = self else {
            return;
        };
        let line = format_entry(at, message);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(error) = result {
            tracing::warn!(
                path = %path.display(),
                %error,
                "could not write error log"
            );
        }
    }
}

fn format_entry<Tz: TimeZone>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {message}\n", at.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).single().expect("valid time")
    }

    #[test]
    fn entry_format_matches_log_layout() {
        assert_eq!(
            format_entry(&fixed_time(), "row 3: missing clip"),
            "[2026-03-09 14:05:07] row 3: missing clip\n"
        );
    }

    #[test]
    fn disabled_sink_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = ErrorLog::for_output_dir(dir.path(), false);
        log.record("ignored");
        assert!(!layout::error_log_path(dir.path()).exists());
    }

    #[test]
    fn enabled_sink_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = ErrorLog::for_output_dir(dir.path(), true);
        log.record_at(&fixed_time(), "first");
        log.record_at(&fixed_time(), "second");

        let text = std::fs::read_to_string(layout::error_log_path(dir.path())).expect("read");
        assert_eq!(
            text,
            "[2026-03-09 14:05:07] first\n[2026-03-09 14:05:07] second\n"
        );
    }

    #[test]
    fn unwritable_sink_does_not_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = ErrorLog::File(dir.path().join("no_such_dir").join("error.log"));
        log.record("dropped");
    }
}
