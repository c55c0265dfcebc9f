use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::PrepResult;

/// The aggregated `output.txt`. Opening truncates whatever a previous run
/// left behind; each row contributes at most one `\n`-terminated line.
#[derive(Debug)]
pub struct TranscriptWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    lines: usize,
}

impl TranscriptWriter {
    pub fn create(path: &Path) -> PrepResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            lines: 0,
        })
    }

    /// Append one line. Embedded line breaks in a cell are kept as-is.
    pub fn write_line(&mut self, text: &str) -> PrepResult<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and close. Dropping without `finish` still closes the file but
    /// swallows a late flush error.
    pub fn finish(mut self) -> PrepResult<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_call() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output.txt");
        let mut writer = TranscriptWriter::create(&path).expect("create");
        writer.write_line("first").expect("write");
        writer.write_line("").expect("write");
        writer.write_line("third").expect("write");
        assert_eq!(writer.lines(), 3);
        writer.finish().expect("finish");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "first\n\nthird\n");
    }

    #[test]
    fn create_truncates_previous_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output.txt");
        std::fs::write(&path, "stale line one\nstale line two\n").expect("seed");

        let mut writer = TranscriptWriter::create(&path).expect("create");
        writer.write_line("fresh").expect("write");
        let written = writer.finish().expect("finish");

        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "fresh\n");
    }

    #[test]
    fn empty_transcript_is_an_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output.txt");
        TranscriptWriter::create(&path)
            .expect("create")
            .finish()
            .expect("finish");
        assert_eq!(std::fs::metadata(&path).expect("meta").len(), 0);
    }

    #[test]
    fn create_fails_when_parent_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("output.txt");
        assert!(TranscriptWriter::create(&path).is_err());
    }
}
