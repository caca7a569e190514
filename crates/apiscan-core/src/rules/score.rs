//! Quality scoring.
//!
//! The score starts at `BASE_SCORE` and loses `Severity::weight()` points per
//! performance finding, saturating at 0. Security findings, advisories and
//! recommendations never contribute.
//!
//! Grade bands (inclusive lower bounds):
//!
//!   - >= 95 → A+
//!   - >= 90 → A
//!   - >= 80 → B
//!   - >= 70 → C
//!   - >= 60 → D
//!   - else  → F

use serde::{Deserialize, Serialize};

use crate::report::model::PerformanceFinding;
use crate::syntax::scan::TreeFacts;

pub const BASE_SCORE: u32 = 100;

/// Letter grade, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl QualityGrade {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 95 => QualityGrade::APlus,
            s if s >= 90 => QualityGrade::A,
            s if s >= 80 => QualityGrade::B,
            s if s >= 70 => QualityGrade::C,
            s if s >= 60 => QualityGrade::D,
            _ => QualityGrade::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityGrade::APlus => "A+",
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
            QualityGrade::D => "D",
            QualityGrade::F => "F",
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn quality_score(findings: &[PerformanceFinding]) -> u32 {
    let penalty = findings
        .iter()
        .fold(0u32, |acc, f| acc.saturating_add(f.severity.weight()));
    BASE_SCORE.saturating_sub(penalty)
}

/// Unweighted count of conditionals, loops and switches.
pub fn complexity(facts: &TreeFacts) -> u32 {
    facts.control_flow.total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::catalog::PerformanceIssue;

    fn findings(issues: &[PerformanceIssue]) -> Vec<PerformanceFinding> {
        issues
            .iter()
            .map(|&i| PerformanceFinding::new(i, 0))
            .collect()
    }

    #[test]
    fn no_findings_is_perfect() {
        assert_eq!(quality_score(&[]), 100);
        assert_eq!(QualityGrade::from_score(100), QualityGrade::APlus);
    }

    #[test]
    fn each_severity_subtracts_its_weight() {
        // critical 25 + high 15 + medium 10
        let f = findings(&[
            PerformanceIssue::RangeLoopQuery,
            PerformanceIssue::MissingIndex,
            PerformanceIssue::MissingCache,
        ]);
        assert_eq!(quality_score(&f), 50);
    }

    #[test]
    fn score_clamps_at_zero() {
        let f = findings(&[PerformanceIssue::CountedLoopQuery; 7]);
        assert_eq!(quality_score(&f), 0);
        assert_eq!(QualityGrade::from_score(0), QualityGrade::F);
    }

    #[test]
    fn grade_band_boundaries() {
        let cases = [
            (95, QualityGrade::APlus),
            (94, QualityGrade::A),
            (90, QualityGrade::A),
            (89, QualityGrade::B),
            (80, QualityGrade::B),
            (79, QualityGrade::C),
            (70, QualityGrade::C),
            (69, QualityGrade::D),
            (60, QualityGrade::D),
            (59, QualityGrade::F),
        ];
        for (score, grade) in cases {
            assert_eq!(QualityGrade::from_score(score), grade, "score {score}");
        }
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(
            serde_json::to_string(&QualityGrade::APlus).unwrap(),
            "\"A+\""
        );
        assert_eq!(serde_json::to_string(&QualityGrade::C).unwrap(), "\"C\"");
    }
}
