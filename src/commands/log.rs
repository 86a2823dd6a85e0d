//! Show part of an engine log

use crate::commands::utils::{output_json, require_project};
use crate::commands::Command;
use crate::error::{Error, Result};
use crate::logview::{latest_log, logs_dir, read_log, LogQuery};
use crate::ui::UI;
use std::path::PathBuf;

/// Command to print a filtered window of a log file.
///
/// Without an explicit path the newest log in the project's `Saved/Logs/`
/// is used.
pub struct LogCommand {
    path: Option<PathBuf>,
    project: Option<PathBuf>,
    query: LogQuery,
    json: bool,
}

impl LogCommand {
    pub fn new(path: Option<PathBuf>, project: Option<PathBuf>, query: LogQuery) -> Self {
        LogCommand {
            path,
            project,
            query,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let root = require_project(self.project.as_deref())?;
        match latest_log(root) {
            Some(log) => {
                tracing::debug!(path = %log.path.display(), modified = %log.modified, "using latest log");
                Ok(log.path)
            }
            None => Err(Error::Other(format!(
                "no log file found in {}; pass a log path explicitly",
                logs_dir(root).display()
            ))),
        }
    }
}

impl Command for LogCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let path = self.log_path()?;
        let window = read_log(&path, &self.query)?;

        if self.json {
            output_json(ui, &window)?;
            return Ok(0);
        }

        if !window.content.is_empty() {
            ui.output(&window.content)?;
        }
        ui.warning(&format!(
            "{}: showing {} of {} lines",
            window.log_path.display(),
            window.returned,
            window.total_lines
        ))?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "log"
    }

    fn help(&self) -> &str {
        "Show part of an engine log"
    }
}
