//! Test names from an `Automation List` log

use crate::automation::AUTOMATION_CHANNEL;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Character classes are ASCII-only: `\w` and `\s` would otherwise accept
// any Unicode letter or space.
static LIST_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{}.*\](?-u:\s)+([A-Za-z0-9_.]+)",
        AUTOMATION_CHANNEL
    ))
    .expect("valid list pattern")
});

/// Extract the available test names from `Automation List` output.
///
/// Entries are printed as `LogAutomationController: Display: ] Name`. Names
/// without a `.` are category banners and other chatter, not tests. Each name
/// appears once, at the position of its first occurrence.
///
/// # Examples
///
/// ```
/// use unreal_headless::automation::parse_test_catalog;
///
/// let log = "\
/// LogAutomationController: Display: ] MyProject.Unit.MathUtils
/// LogAutomationController: Display: ] Banner
/// LogAutomationController: Display: ] MyProject.Unit.MathUtils
/// ";
/// assert_eq!(parse_test_catalog(log), vec!["MyProject.Unit.MathUtils"]);
/// ```
pub fn parse_test_catalog(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tests = Vec::new();

    for line in output.split('\n') {
        if !line.contains(AUTOMATION_CHANNEL) {
            continue;
        }
        let Some(caps) = LIST_ENTRY_RE.captures(line) else {
            continue;
        };
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        if !name.is_empty() && name.contains('.') && seen.insert(name) {
            tests.push(name.to_string());
        }
    }

    tracing::debug!(tests = tests.len(), "parsed test catalog");
    tests
}

/// Keep the tests whose name contains `filter`, ignoring case.
///
/// An empty filter keeps everything.
pub fn filter_tests(tests: Vec<String>, filter: &str) -> Vec<String> {
    if filter.is_empty() {
        return tests;
    }
    let needle = filter.to_lowercase();
    tests
        .into_iter()
        .filter(|t| t.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "[2025.01.01-00.00.00:000][  0]LogAutomationController: Display:";

    #[test]
    fn test_empty_input() {
        assert!(parse_test_catalog("").is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_position() {
        let log = format!(
            "{p} ] MyProject.Unit.MathUtils\n{p} ] MyProject.Unit.StringUtils\n{p} ] MyProject.Unit.MathUtils",
            p = PREFIX
        );
        assert_eq!(
            parse_test_catalog(&log),
            vec!["MyProject.Unit.MathUtils", "MyProject.Unit.StringUtils"]
        );
    }

    #[test]
    fn test_ignores_non_dotted() {
        let log = format!("{} ] SomeNonTestName", PREFIX);
        assert!(parse_test_catalog(&log).is_empty());
    }

    #[test]
    fn test_requires_channel() {
        let log = "[2025.01.01-00.00.00:000][  0]LogTemp: Display: ] MyProject.Unit.MathUtils";
        assert!(parse_test_catalog(log).is_empty());
    }

    #[test]
    fn test_case_preserved() {
        let log = format!("{} ] MyProject.UI.HUDLayout\r\n", PREFIX);
        assert_eq!(parse_test_catalog(&log), vec!["MyProject.UI.HUDLayout"]);
    }

    #[test]
    fn test_filter_tests() {
        let tests = vec![
            "MyProject.Unit.MathUtils".to_string(),
            "MyProject.Integration.GameMode".to_string(),
            "Engine.Core.Math".to_string(),
        ];
        assert_eq!(
            filter_tests(tests.clone(), "math"),
            vec!["MyProject.Unit.MathUtils", "Engine.Core.Math"]
        );
        assert_eq!(filter_tests(tests.clone(), "").len(), 3);
        assert!(filter_tests(tests, "Visual").is_empty());
    }

    #[test]
    fn test_names_borrowed_across_lines() {
        let log = format!(
            "{p} ] MyProject.A\n{p} ] MyProject.B\n{p} ] MyProject.A\n",
            p = PREFIX
        );
        assert_eq!(parse_test_catalog(&log), vec!["MyProject.A", "MyProject.B"]);
    }

    #[test]
    fn test_names_are_ascii() {
        let log = format!(
            "{p} ] \u{dc}nicode.Test\n{p}\u{a0}]\u{a0}MyProject.Nbsp\n{p} ] MyProject.Caf\u{e9}\n",
            p = PREFIX
        );
        // Matching stops at the first non-ASCII character.
        assert_eq!(parse_test_catalog(&log), vec!["MyProject.Caf"]);
    }
}
