//! Summarize errors and warnings from build output

use crate::commands::utils::{output_json, Input};
use crate::commands::Command;
use crate::diagnostics::{BuildReport, MAX_REPORTED_WARNINGS};
use crate::error::Result;
use crate::ui::UI;

/// Command to extract diagnostics from a captured build log.
pub struct BuildReportCommand {
    input: Input,
    exit_code: Option<i32>,
    json: bool,
}

impl BuildReportCommand {
    /// Creates a new build-report command.
    ///
    /// # Arguments
    /// * `input` - Where the build output comes from
    /// * `exit_code` - Exit code of the build tool, if known
    pub fn new(input: Input, exit_code: Option<i32>) -> Self {
        BuildReportCommand {
            input,
            exit_code,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Command for BuildReportCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let output = self.input.read()?;
        let report = BuildReport::from_output(&output, self.exit_code);
        let exit_code = if report.success { 0 } else { 1 };

        if self.json {
            output_json(ui, &report)?;
            return Ok(exit_code);
        }

        ui.output(if report.success {
            "Build succeeded"
        } else {
            "Build failed"
        })?;
        if let Some(code) = report.exit_code {
            ui.output(&format!("Exit code: {}", code))?;
        }
        ui.output(&format!("Errors: {}", report.error_count))?;
        ui.output(&format!("Warnings: {}", report.warning_count))?;

        if !report.errors.is_empty() {
            ui.output("")?;
            ui.output("Errors:")?;
            for error in &report.errors {
                ui.output(&format!("  {}", error))?;
            }
        }

        if !report.warnings.is_empty() {
            ui.output("")?;
            if report.warning_count > MAX_REPORTED_WARNINGS {
                ui.output(&format!(
                    "Warnings (first {} of {}):",
                    MAX_REPORTED_WARNINGS, report.warning_count
                ))?;
            } else {
                ui.output("Warnings:")?;
            }
            for warning in &report.warnings {
                ui.output(&format!("  {}", warning))?;
            }
        }

        Ok(exit_code)
    }

    fn name(&self) -> &str {
        "build-report"
    }

    fn help(&self) -> &str {
        "Summarize errors and warnings from build output"
    }
}
