//! Command system for ue-headless
//!
//! Each subcommand is a type implementing the Command trait.

use crate::error::Result;
use crate::ui::UI;

pub mod build_report;
pub mod config_ops;
pub mod list_tests;
pub mod log;
pub mod test_results;
pub mod utils;

pub use build_report::BuildReportCommand;
pub use config_ops::{ConfigAction, ConfigCommand};
pub use list_tests::ListTestsCommand;
pub use log::LogCommand;
pub use test_results::TestResultsCommand;
pub use utils::Input;

/// Trait that all commands must implement
pub trait Command {
    /// Execute the command, returning the process exit code
    fn execute(&self, ui: &mut dyn UI) -> Result<i32>;

    /// Get the command name
    fn name(&self) -> &str;

    /// Get command help text
    fn help(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCommand;

    impl Command for MockCommand {
        fn execute(&self, _ui: &mut dyn UI) -> Result<i32> {
            Ok(0)
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn help(&self) -> &str {
            "A mock command for testing"
        }
    }

    #[test]
    fn test_command_trait() {
        let cmd = MockCommand;
        assert_eq!(cmd.name(), "mock");
        assert_eq!(cmd.help(), "A mock command for testing");
    }

    #[test]
    fn test_commands_as_trait_objects() {
        let commands: Vec<Box<dyn Command>> = vec![
            Box::new(BuildReportCommand::new(Input::Text(String::new()), None)),
            Box::new(TestResultsCommand::new(Input::Text(String::new()))),
            Box::new(ListTestsCommand::new(Input::Text(String::new()), None)),
        ];
        let names: Vec<&str> = commands.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["build-report", "test-results", "list-tests"]);
    }
}
