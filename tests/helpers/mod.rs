#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

/// Write a workbook whose first sheet has a `FileName | TextData` header
/// followed by `rows`.
pub fn write_table(dir: &Path, file_name: &str, rows: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "FileName").expect("header");
    sheet.write_string(0, 1, "TextData").expect("header");
    for (offset, (clip, text)) in rows.iter().enumerate() {
        let row = u32::try_from(offset).expect("row fits") + 1;
        sheet.write_string(row, 0, *clip).expect("clip cell");
        sheet.write_string(row, 1, *text).expect("text cell");
    }
    workbook.save(&path).expect("save workbook");
    path
}

/// Write a placeholder clip. Content is arbitrary; nothing decodes it.
pub fn write_clip(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("RIFF dummy wav content for {name}")).expect("write clip");
    path
}

pub fn output_dir(input: &Path) -> PathBuf {
    input.join("output")
}

pub fn transcript(input: &Path) -> String {
    fs::read_to_string(output_dir(input).join("output.txt")).expect("read output.txt")
}

/// Sorted names of everything in `output/`.
pub fn output_entries(input: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(output_dir(input))
        .expect("read output dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
