//! Output formatting and CSV export.
//!
//! Supports pretty-printing, JSON serialization, and CSV write/append.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rust debug pretty-print
    #[default]
    Pretty,
    /// Pretty-printed JSON
    Json,
}

/// Renders a value for the terminal in the requested format.
pub fn render<T: Serialize + Debug>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(format!("{:#?}", value)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Writes records as CSV rows, returning how many rows were written.
///
/// With `append`, rows are added to an existing file and the header is only
/// written when the file did not exist yet. Otherwise the file is replaced.
pub fn write_csv<T: Serialize>(path: &Path, records: &[T], append: bool) -> Result<usize> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, append, rows = records.len(), "Writing CSV");

    let file = if append {
        OpenOptions::new().append(true).create(true).open(path)
    } else {
        OpenOptions::new().write(true).create(true).truncate(true).open(path)
    }
    .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!(append && file_exists))
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;
    use std::fs;

    fn courses() -> Vec<Course> {
        vec![
            Course::new("CS 201", "Data Structures", 4).with_department("Computer Science"),
            Course::new("MATH 220", "Linear Algebra", 3).with_department("Mathematics"),
        ]
    }

    #[test]
    fn test_render_pretty_uses_debug_form() {
        let out = render(&courses(), OutputFormat::Pretty).unwrap();
        assert!(out.contains("Data Structures"));
        assert!(out.contains("Course {"));
    }

    #[test]
    fn test_render_json_uses_camel_case() {
        let out = render(&courses(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["enrollmentStatus"], "enrolled");
        assert_eq!(value[1]["code"], "MATH 220");
    }

    #[test]
    fn test_write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");

        let written = write_csv(&path, &courses(), false).unwrap();

        assert_eq!(written, 2);
        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 rows
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");

        write_csv(&path, &courses(), true).unwrap();
        write_csv(&path, &courses(), true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("enrollmentStatus")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 5);
    }

    #[test]
    fn test_overwrite_replaces_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");

        write_csv(&path, &courses(), false).unwrap();
        write_csv(&path, &courses()[..1], false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
