//! List available tests

use crate::automation::{filter_tests, parse_test_catalog};
use crate::commands::utils::{output_json, Input};
use crate::commands::Command;
use crate::error::Result;
use crate::ui::UI;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TestList<'a> {
    tests: &'a [String],
    total: usize,
}

/// Command to list the tests found in `Automation List` output.
pub struct ListTestsCommand {
    input: Input,
    filter: Option<String>,
    json: bool,
}

impl ListTestsCommand {
    /// Creates a new list-tests command.
    ///
    /// # Arguments
    /// * `input` - Where the `Automation List` output comes from
    /// * `filter` - Optional case-insensitive substring the names must contain
    pub fn new(input: Input, filter: Option<String>) -> Self {
        ListTestsCommand {
            input,
            filter,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Command for ListTestsCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let output = self.input.read()?;
        let tests = filter_tests(
            parse_test_catalog(&output),
            self.filter.as_deref().unwrap_or(""),
        );

        if self.json {
            output_json(
                ui,
                &TestList {
                    tests: &tests,
                    total: tests.len(),
                },
            )?;
            return Ok(0);
        }

        if tests.is_empty() {
            ui.output("No tests found")?;
        } else {
            for test in &tests {
                ui.output(test)?;
            }
        }
        Ok(0)
    }

    fn name(&self) -> &str {
        "list-tests"
    }

    fn help(&self) -> &str {
        "List all available tests"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_ui::TestUI;

    const LIST: &str = "\
LogAutomationController: Display: Found 3 automation tests
LogAutomationController: Display: ] Pelorus.Unit.Grid
LogAutomationController: Display: ] Pelorus.Unit.Dem
LogAutomationController: Display: ] Pelorus.Visual.Coast
";

    #[test]
    fn test_list_tests_command() {
        let mut ui = TestUI::new();
        let cmd = ListTestsCommand::new(Input::Text(LIST.to_string()), None);
        assert_eq!(cmd.execute(&mut ui).unwrap(), 0);
        assert_eq!(
            ui.output,
            vec!["Pelorus.Unit.Grid", "Pelorus.Unit.Dem", "Pelorus.Visual.Coast"]
        );
    }

    #[test]
    fn test_list_tests_with_filter() {
        let mut ui = TestUI::new();
        let cmd = ListTestsCommand::new(Input::Text(LIST.to_string()), Some("unit".to_string()));
        cmd.execute(&mut ui).unwrap();
        assert_eq!(ui.output, vec!["Pelorus.Unit.Grid", "Pelorus.Unit.Dem"]);
    }

    #[test]
    fn test_list_tests_none_found() {
        let mut ui = TestUI::new();
        let cmd = ListTestsCommand::new(Input::Text(LIST.to_string()), Some("Network".to_string()));
        assert_eq!(cmd.execute(&mut ui).unwrap(), 0);
        assert_eq!(ui.output, vec!["No tests found"]);
    }

    #[test]
    fn test_list_tests_json() {
        let mut ui = TestUI::new();
        let cmd = ListTestsCommand::new(Input::Text(LIST.to_string()), None).with_json(true);
        cmd.execute(&mut ui).unwrap();
        let value: serde_json::Value = serde_json::from_str(&ui.output[0]).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["tests"][2], "Pelorus.Visual.Coast");
    }
}
