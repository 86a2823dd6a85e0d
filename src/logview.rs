//! Windowed reading of engine log files
//!
//! Full engine logs run to tens of thousands of lines. [`read_log`] returns a
//! filtered slice of one, and [`latest_log`] finds the log written by the most
//! recent editor run under `Saved/Logs/`.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Lines returned when no limit is given.
pub const DEFAULT_MAX_LINES: usize = 200;

/// Hard cap on lines returned.
pub const MAX_LINES_CAP: usize = 500;

/// Which part of a log to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Keep only lines containing this text, ignoring case.
    pub filter: Option<String>,
    /// Lines to skip, counted after filtering.
    pub offset: usize,
    /// Lines to return; `None` or 0 means [`DEFAULT_MAX_LINES`].
    pub max_lines: Option<usize>,
}

impl LogQuery {
    fn limit(&self) -> usize {
        match self.max_lines {
            None | Some(0) => DEFAULT_MAX_LINES,
            Some(n) => n.min(MAX_LINES_CAP),
        }
    }
}

/// A slice of a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogWindow {
    pub log_path: PathBuf,
    pub content: String,
    /// Lines in the whole file, before filtering.
    pub total_lines: usize,
    pub returned: usize,
}

/// Apply a query to log text: filter, then offset, then limit.
///
/// Returns the selected lines and the total line count of `text`.
pub fn select_lines<'a>(text: &'a str, query: &LogQuery) -> (Vec<&'a str>, usize) {
    let lines: Vec<&str> = text.split('\n').collect();
    let total = lines.len();

    let needle = query
        .filter
        .as_deref()
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    let selected = lines
        .into_iter()
        .filter(|line| match &needle {
            Some(needle) => line.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .skip(query.offset)
        .take(query.limit())
        .collect();

    (selected, total)
}

/// Read part of a log file.
///
/// Paths with a `..` component are refused.
pub fn read_log(path: &Path, query: &LogQuery) -> Result<LogWindow> {
    if path.components().any(|c| c == Component::ParentDir) {
        tracing::warn!(path = %path.display(), "rejected log path");
        return Err(Error::PathTraversal(format!(
            "invalid log path {}: parent directory segments are not allowed",
            path.display()
        )));
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    // Engine logs are UTF-8 but may contain stray bytes from tool output.
    let text = String::from_utf8_lossy(&bytes);

    let (lines, total_lines) = select_lines(&text, query);
    tracing::debug!(
        path = %path.display(),
        total_lines,
        returned = lines.len(),
        "read log window"
    );

    Ok(LogWindow {
        log_path: path.to_path_buf(),
        returned: lines.len(),
        content: lines.join("\n"),
        total_lines,
    })
}

/// A log file and when it was last written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFile {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

/// Directory the editor writes its logs to.
pub fn logs_dir(project_root: &Path) -> PathBuf {
    project_root.join("Saved").join("Logs")
}

/// The most recently modified `.log` file in `<project_root>/Saved/Logs/`.
///
/// Returns `None` when the directory is missing or holds no logs.
pub fn latest_log(project_root: &Path) -> Option<LogFile> {
    let entries = fs::read_dir(logs_dir(project_root)).ok()?;

    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
        .filter_map(|e| {
            let modified = e.metadata().and_then(|m| m.modified()).ok()?;
            Some(LogFile {
                path: e.path(),
                modified: DateTime::<Utc>::from(modified),
            })
        })
        .max_by_key(|log| log.modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn numbered(n: usize) -> String {
        (0..n)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_default_limit() {
        let text = numbered(300);
        let (lines, total) = select_lines(&text, &LogQuery::default());
        assert_eq!(total, 300);
        assert_eq!(lines.len(), DEFAULT_MAX_LINES);
        assert_eq!(lines[0], "line 0");
    }

    #[test]
    fn test_limit_capped() {
        let text = numbered(800);
        let query = LogQuery {
            max_lines: Some(10_000),
            ..Default::default()
        };
        let (lines, _) = select_lines(&text, &query);
        assert_eq!(lines.len(), MAX_LINES_CAP);
    }

    #[test]
    fn test_filter_then_offset() {
        let text = "\
LogInit: Display: starting
LogAutomationController: Error: one
LogTemp: nothing
logautomationcontroller: lower
LogAutomationController: Display: two";
        let query = LogQuery {
            filter: Some("LOGAUTOMATIONCONTROLLER".to_string()),
            offset: 1,
            max_lines: Some(5),
        };
        let (lines, total) = select_lines(text, &query);
        assert_eq!(total, 5);
        assert_eq!(
            lines,
            vec![
                "logautomationcontroller: lower",
                "LogAutomationController: Display: two"
            ]
        );
    }

    #[test]
    fn test_offset_past_end() {
        let query = LogQuery {
            offset: 50,
            ..Default::default()
        };
        let (lines, total) = select_lines("a\nb", &query);
        assert!(lines.is_empty());
        assert_eq!(total, 2);
    }

    #[test]
    fn test_read_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Pelorus.log");
        fs::write(&path, "a\nb\nc").unwrap();

        let window = read_log(
            &path,
            &LogQuery {
                max_lines: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(window.content, "a\nb");
        assert_eq!(window.total_lines, 3);
        assert_eq!(window.returned, 2);
    }

    #[test]
    fn test_read_log_rejects_parent_dir() {
        let err = read_log(Path::new("Saved/../../etc/passwd"), &LogQuery::default()).unwrap_err();
        assert!(matches!(err, Error::PathTraversal(_)));
    }

    #[test]
    fn test_read_log_missing() {
        let temp = TempDir::new().unwrap();
        let err = read_log(&temp.path().join("none.log"), &LogQuery::default()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_latest_log() {
        let temp = TempDir::new().unwrap();
        assert!(latest_log(temp.path()).is_none());

        let dir = logs_dir(temp.path());
        fs::create_dir_all(&dir).unwrap();
        let old = dir.join("Pelorus-backup.log");
        let new = dir.join("Pelorus.log");
        fs::write(&old, "old").unwrap();
        fs::write(&new, "new").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let now = SystemTime::now();
        fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(now - Duration::from_secs(3600))
            .unwrap();
        fs::File::options()
            .write(true)
            .open(&new)
            .unwrap()
            .set_modified(now)
            .unwrap();

        assert_eq!(latest_log(temp.path()).unwrap().path, new);
    }
}
