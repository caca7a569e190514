//! Severity gate for CI usage.
//!
//! This module derives a pass/fail verdict from a set of analyzed files.
//!
//! Responsibilities:
//! - Compare every security and performance finding against a threshold
//! - Compute a CI-compatible exit code
//!
//! Non-responsibilities:
//! - Evaluating rules (handled in `rules::eval`)
//! - Scoring (advisories and recommendations carry no severity and are
//!   ignored here too)
//!
//! Policy: the gate is exceeded when any finding has severity ≥ threshold.
//! It only fails the run when `fail_on_issues` is set.

use serde::{Deserialize, Serialize};

use crate::report::model::FileAnalysis;
use crate::rules::catalog::Severity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateInfo {
    pub threshold: Severity,
    pub fail_on_issues: bool,
    /// Highest severity observed across all files, if any finding exists.
    pub highest_severity: Option<Severity>,
    /// Number of findings at or above the threshold.
    pub findings_at_or_above: usize,
    pub exceeded: bool,
    pub exit_code: i32,
}

/// Evaluates the severity gate over analyzed files.
///
/// Exit code mapping:
/// - gate not exceeded, or `fail_on_issues` unset → 0
/// - gate exceeded and `fail_on_issues` set       → 1
pub fn evaluate_gate(
    files: &[FileAnalysis],
    threshold: Severity,
    fail_on_issues: bool,
) -> GateInfo {
    let severities: Vec<Severity> = files
        .iter()
        .flat_map(|f| {
            let a = &f.analysis;
            a.security_issues()
                .iter()
                .map(|s| s.severity)
                .chain(a.performance_hints().iter().map(|p| p.severity))
        })
        .collect();

    let highest_severity = severities.iter().max().copied();
    let findings_at_or_above = severities.iter().filter(|&&s| s >= threshold).count();
    let exceeded = findings_at_or_above > 0;

    let exit_code = if exceeded && fail_on_issues { 1 } else { 0 };

    GateInfo {
        threshold,
        fail_on_issues,
        highest_severity,
        findings_at_or_above,
        exceeded,
        exit_code,
    }
}
