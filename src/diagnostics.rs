//! Build diagnostics extraction
//!
//! Compiler and UnrealBuildTool output reports problems as
//! `<path>(<line>): error <message>` or `<path>(<line>): warning <message>`.
//! This module scrapes those lines out of the combined stdout/stderr of a
//! build and condenses them into a [`BuildReport`].

use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Number of warnings kept in a [`BuildReport`].
pub const MAX_REPORTED_WARNINGS: usize = 20;

/// Number of trailing output lines kept in a [`BuildReport`].
pub const LOG_TAIL_LINES: usize = 50;

// Digits and spaces are ASCII-only, as in the tool output being matched.
static ERROR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+\((?-u:\d)+\):(?-u:\s)+error(?-u:\s)+.*$").expect("valid error pattern")
});

static WARNING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+\((?-u:\d)+\):(?-u:\s)+warning(?-u:\s)+.*$")
        .expect("valid warning pattern")
});

/// Errors and warnings found in a build log, each deduplicated in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Extract error and warning lines from build output.
///
/// Each physical line is tested on its own; partial matches inside a line do
/// not count. Lines that never match are ignored, so this never fails.
///
/// # Examples
///
/// ```
/// use unreal_headless::diagnostics::parse_build_diagnostics;
///
/// let output = "\
/// Source/Foo.cpp(12): error C2065: 'x': undeclared identifier
/// Building 3 actions...
/// Source/Foo.cpp(40): warning C4996: deprecated call
/// Source/Foo.cpp(12): error C2065: 'x': undeclared identifier
/// ";
/// let diags = parse_build_diagnostics(output);
/// assert_eq!(diags.errors.len(), 1);
/// assert_eq!(diags.warnings.len(), 1);
/// ```
pub fn parse_build_diagnostics(output: &str) -> BuildDiagnostics {
    let diags = BuildDiagnostics {
        errors: matching_lines(&ERROR_RE, output),
        warnings: matching_lines(&WARNING_RE, output),
    };
    tracing::debug!(
        errors = diags.errors.len(),
        warnings = diags.warnings.len(),
        "parsed build diagnostics"
    );
    diags
}

/// Extract only the error lines from build output.
pub fn parse_build_errors(output: &str) -> Vec<String> {
    matching_lines(&ERROR_RE, output)
}

/// Extract only the warning lines from build output.
pub fn parse_build_warnings(output: &str) -> Vec<String> {
    matching_lines(&WARNING_RE, output)
}

fn matching_lines(re: &Regex, output: &str) -> Vec<String> {
    dedup(output.split('\n').filter(|line| re.is_match(line)))
}

/// Deduplicate on trimmed text, keeping the first occurrence's position.
/// Items that are blank after trimming are dropped.
pub fn dedup<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for item in items {
        let trimmed = item.trim();
        if !trimmed.is_empty() && seen.insert(trimmed) {
            result.push(trimmed.to_string());
        }
    }
    result
}

/// Return the last `n` lines of `s`, trimmed. The whole text is returned
/// (trimmed) when it has `n` lines or fewer.
pub fn last_n_lines(s: &str, n: usize) -> String {
    let lines: Vec<&str> = s.split('\n').collect();
    if lines.len() <= n {
        return s.trim().to_string();
    }
    lines[lines.len() - n..].join("\n").trim().to_string()
}

/// Condensed view of a build for callers that cannot take the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<String>,
    /// At most [`MAX_REPORTED_WARNINGS`] entries; `warning_count` has the total.
    pub warnings: Vec<String>,
    pub log_tail: String,
}

impl BuildReport {
    /// Build a report from combined build output.
    ///
    /// With an exit code, success means the tool exited with 0. Without one,
    /// success means no error lines were found.
    pub fn from_output(output: &str, exit_code: Option<i32>) -> Self {
        let BuildDiagnostics {
            errors,
            mut warnings,
        } = parse_build_diagnostics(output);

        let success = match exit_code {
            Some(code) => code == 0,
            None => errors.is_empty(),
        };
        let error_count = errors.len();
        let warning_count = warnings.len();
        warnings.truncate(MAX_REPORTED_WARNINGS);

        BuildReport {
            success,
            exit_code,
            error_count,
            warning_count,
            errors,
            warnings,
            log_tail: last_n_lines(output, LOG_TAIL_LINES),
        }
    }
}
