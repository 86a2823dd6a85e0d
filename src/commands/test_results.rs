//! Report per-test outcomes from an automation run log

use crate::automation::{parse_test_results, RunSummary, TestOutcome, TestStatus};
use crate::commands::utils::{output_json, Input};
use crate::commands::Command;
use crate::error::Result;
use crate::ui::UI;
use serde::Serialize;

/// Summary plus the individual outcomes, as printed by `--json`.
#[derive(Debug, Serialize)]
struct TestRunReport<'a> {
    #[serde(flatten)]
    summary: &'a RunSummary,
    results: &'a [TestOutcome],
}

/// Command to turn an `Automation RunTests` log into test results.
pub struct TestResultsCommand {
    input: Input,
    json: bool,
}

impl TestResultsCommand {
    pub fn new(input: Input) -> Self {
        TestResultsCommand { input, json: false }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Command for TestResultsCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let output = self.input.read()?;
        let outcomes = parse_test_results(&output);
        let summary = RunSummary::from_outcomes(&outcomes);
        let exit_code = if summary.success { 0 } else { 1 };

        if self.json {
            output_json(
                ui,
                &TestRunReport {
                    summary: &summary,
                    results: &outcomes,
                },
            )?;
            return Ok(exit_code);
        }

        if outcomes.is_empty() {
            ui.warning("No test results found in output")?;
        }

        ui.output(&format!("Total tests: {}", summary.total_tests))?;
        ui.output(&format!("Passed: {}", summary.passed))?;
        ui.output(&format!("Failed: {}", summary.failed))?;
        ui.output(&format!("Skipped: {}", summary.skipped))?;

        let failing: Vec<&TestOutcome> = outcomes
            .iter()
            .filter(|o| o.status == TestStatus::Fail)
            .collect();
        if !failing.is_empty() {
            ui.output("")?;
            ui.output("Failed tests:")?;
            for outcome in failing {
                ui.output(&format!("  {}", outcome.name))?;
                for event in &outcome.events {
                    ui.output(&format!("    {}", event))?;
                }
            }
        }

        Ok(exit_code)
    }

    fn name(&self) -> &str {
        "test-results"
    }

    fn help(&self) -> &str {
        "Report per-test outcomes from an automation log"
    }
}
