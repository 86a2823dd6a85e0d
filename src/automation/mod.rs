//! Parsing of Unreal automation-controller logs
//!
//! `UnrealEditor-Cmd -ExecCmds="Automation ..."` reports through the
//! `LogAutomationController` channel:
//!
//! ```text
//! LogAutomationController: Display: ] MyProject.Unit.MathUtils
//! LogAutomationController: Error: Expected value 42 but got 0
//! LogAutomationController: Display: Test Completed. Result={Failed} Test={MyProject.Unit.CalculationTest}
//! ```
//!
//! [`catalog`] reads the output of `Automation List`, [`results`] the output
//! of `Automation RunTests`.

pub mod catalog;
pub mod results;

pub use catalog::{filter_tests, parse_test_catalog};
pub use results::{parse_test_results, RunSummary, TestOutcome, TestStatus};

/// Channel tag carried by every automation-controller log line.
pub const AUTOMATION_CHANNEL: &str = "LogAutomationController";
