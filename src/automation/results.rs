//! Per-test outcomes from an `Automation RunTests` log

use crate::automation::AUTOMATION_CHANNEL;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static COMPLETED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{}.*Test Completed\.(?-u:\s)+Result=\{{((?-u:\w)+)\}}(?-u:\s)+Test=\{{([^}}]+)\}}",
        AUTOMATION_CHANNEL
    ))
    .expect("valid completion pattern")
});

static EVENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}.*(?:Error|Warning):(?-u:\s)+(.+)", AUTOMATION_CHANNEL))
        .expect("valid event pattern")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Test Completed.*Duration=\{([^}]+)\}").expect("valid duration pattern")
});

/// Outcome of a single automation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}

impl TestStatus {
    /// Map the word inside `Result={...}`.
    ///
    /// Unknown words count as a pass. The engine has no stable list of
    /// result names, and this mirrors what the log consumers have always
    /// reported.
    pub fn from_result_word(word: &str) -> Self {
        match word.to_ascii_lowercase().as_str() {
            "failed" | "fail" => TestStatus::Fail,
            "skipped" | "skip" | "notrun" => TestStatus::Skip,
            _ => TestStatus::Pass,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Fail)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "pass"),
            TestStatus::Fail => write!(f, "fail"),
            TestStatus::Skip => write!(f, "skip"),
        }
    }
}

/// One `Test Completed.` line, with the diagnostics that led up to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    /// Fully qualified test name, e.g. `MyProject.Unit.MathUtils`.
    pub name: String,
    pub status: TestStatus,
    /// Raw `Duration={...}` value when the engine reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Error/warning messages logged before the completion line. Only
    /// failing tests carry them, and a failing test may have none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

/// Pending diagnostic messages between two completion lines.
#[derive(Debug, Default)]
enum EventAccumulator {
    #[default]
    Idle,
    Collecting(Vec<String>),
}

impl EventAccumulator {
    fn push(&mut self, message: String) {
        match self {
            EventAccumulator::Idle => *self = EventAccumulator::Collecting(vec![message]),
            EventAccumulator::Collecting(events) => events.push(message),
        }
    }

    /// Hand over everything collected so far and go back to idle.
    fn flush(&mut self) -> Vec<String> {
        match std::mem::take(self) {
            EventAccumulator::Idle => Vec::new(),
            EventAccumulator::Collecting(events) => events,
        }
    }
}

/// Reconstruct per-test outcomes from automation log output.
///
/// Outcomes come back in the order of their completion lines. Diagnostic
/// lines are attached to the next completion line when that test failed and
/// are discarded otherwise; anything after the last completion is dropped.
///
/// # Examples
///
/// ```
/// use unreal_headless::automation::{parse_test_results, TestStatus};
///
/// let log = "\
/// LogAutomationController: Error: Expected value 42 but got 0
/// LogAutomationController: Display: Test Completed. Result={Failed} Test={MyProject.Unit.Calc}
/// LogAutomationController: Display: Test Completed. Result={Passed} Test={MyProject.Unit.Math}
/// ";
/// let outcomes = parse_test_results(log);
/// assert_eq!(outcomes.len(), 2);
/// assert_eq!(outcomes[0].status, TestStatus::Fail);
/// assert_eq!(outcomes[0].events, vec!["Expected value 42 but got 0"]);
/// assert!(outcomes[1].events.is_empty());
/// ```
pub fn parse_test_results(output: &str) -> Vec<TestOutcome> {
    let mut outcomes = Vec::new();
    let mut pending = EventAccumulator::default();

    for line in output.split('\n') {
        if let Some(caps) = EVENT_RE.captures(line) {
            pending.push(caps[1].trim().to_string());
            continue;
        }

        let Some(caps) = COMPLETED_RE.captures(line) else {
            continue;
        };

        let status = TestStatus::from_result_word(&caps[1]);
        let duration = DURATION_RE
            .captures(line)
            .map(|d| d[1].to_string());
        let events = pending.flush();

        outcomes.push(TestOutcome {
            name: caps[2].to_string(),
            status,
            duration,
            events: if status.is_failure() { events } else { Vec::new() },
        });
    }

    tracing::debug!(tests = outcomes.len(), "parsed automation results");
    outcomes
}

/// Totals over a list of outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// True when at least one test ran and none failed.
    pub success: bool,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[TestOutcome]) -> Self {
        let mut summary = RunSummary {
            total_tests: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.status {
                TestStatus::Pass => summary.passed += 1,
                TestStatus::Fail => summary.failed += 1,
                TestStatus::Skip => summary.skipped += 1,
            }
        }
        summary.success = summary.failed == 0 && summary.total_tests > 0;
        summary
    }
}
