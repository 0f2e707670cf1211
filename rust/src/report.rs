//! Plain-text schedule detail report.
//!
//! Writes are atomic: the report is assembled in a temporary file next to the
//! destination and renamed into place, so a failed export leaves nothing
//! behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::{GanttRow, RowKind};

pub const REPORT_TITLE: &str = "Project Schedule Details";

const HEADERS: [&str; 5] = ["Name", "Type", "Start Date", "End Date", "Duration (days)"];

/// Errors that can occur while exporting a schedule.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("There is no schedule data to export")]
    NoData,
    #[error("Failed to write schedule report: {0}")]
    Io(#[from] std::io::Error),
}

fn row_cells(row: &GanttRow) -> [String; 5] {
    let indent = "  ".repeat(usize::from(row.level));
    let duration = match row.kind {
        RowKind::Milestone => "-".to_string(),
        RowKind::Phase | RowKind::Task => row.duration_days.to_string(),
    };
    [
        format!("{}{}", indent, row.name),
        row.kind.to_string(),
        row.start_date.to_string(),
        row.end_date.to_string(),
        duration,
    ]
}

/// Render rows as an aligned table under a title line.
pub fn format_report(rows: &[GanttRow]) -> String {
    let body: Vec<[String; 5]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    out.push_str(&format_line(&HEADERS.map(String::from)));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for cells in &body {
        out.push_str(&format_line(cells));
        out.push('\n');
    }
    out
}

/// Write the detail report for `rows` to `path`.
///
/// Empty schedules are refused. The destination is only replaced once the
/// whole report has been written.
pub fn write_report(rows: &[GanttRow], path: &Path) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NoData);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(format_report(rows).as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|err| ExportError::Io(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;
    use crate::models::{Group, Item, Phase};
    use crate::schedule::compute_schedule;
    use chrono::NaiveDate;

    fn sample_rows() -> Vec<GanttRow> {
        let phases = vec![Phase::new(
            "p",
            "Launch",
            vec![
                Group::single(Item::task("a", "Release prep", 3)),
                Group::single(Item::milestone("m", "Go live")),
            ],
        )];
        let deadline = NaiveDate::from_ymd_opt(2024, 6, 30);
        compute_schedule(&phases, deadline, &ScheduleConfig::default())
    }

    #[test]
    fn test_format_report_layout() {
        let report = format_report(&sample_rows());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("Name"));
        assert!(lines[2].ends_with("Duration (days)"));
        assert!(lines[3].starts_with("---"));
        assert!(lines[4].starts_with("Launch "));
        assert!(lines[4].contains("| Phase "));
        assert!(lines[4].contains("2024-06-26"));
        assert!(lines[5].starts_with("  Release prep"));
        assert!(lines[5].ends_with("| 3"));
        assert!(lines[6].starts_with("  Go live"));
        assert!(lines[6].ends_with("| -"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_columns_align() {
        let report = format_report(&sample_rows());
        let positions: Vec<usize> = report
            .lines()
            .skip(2)
            .filter(|l| !l.starts_with('-'))
            .map(|l| l.find('|').unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.txt");

        write_report(&sample_rows(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format_report(&sample_rows()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_report_refuses_empty_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.txt");

        assert!(matches!(write_report(&[], &path), Err(ExportError::NoData)));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_report_missing_directory_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("schedule.txt");

        let err = write_report(&sample_rows(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(err.to_string().starts_with("Failed to write schedule report"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
