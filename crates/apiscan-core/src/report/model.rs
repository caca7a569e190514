use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyntaxError;
use crate::rules::catalog::{
    AdvisoryCategory, PerformanceIssue, RecommendationCategory, SecurityCategory, Severity,
};
use crate::rules::eval::RuleOutput;
use crate::rules::gate::GateInfo;
use crate::rules::score::{BASE_SCORE, QualityGrade, quality_score};
use crate::util::deterministic::sort_files_by_path;
use crate::{RULE_CATALOG_VERSION, SCHEMA_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityFinding {
    #[serde(rename = "type")]
    pub category: SecurityCategory,
    pub description: String,
    pub severity: Severity,
    /// 1-based; 0 means file-level.
    pub line_number: u32,
    pub suggestion: String,
}

impl SecurityFinding {
    pub fn new(category: SecurityCategory, line_number: u32) -> Self {
        Self {
            category,
            description: category.description().to_string(),
            severity: category.severity(),
            line_number,
            suggestion: category.suggestion().to_string(),
        }
    }

    pub fn syntax_error(err: &SyntaxError) -> Self {
        let category = SecurityCategory::SyntaxError;
        Self {
            suggestion: format!("{}: {err}", category.suggestion()),
            ..Self::new(category, err.line())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerformanceFinding {
    pub issue: PerformanceIssue,
    pub impact: String,
    pub solution: String,
    pub code_example: Option<String>,
    /// 1-based; 0 means file-level.
    pub line_number: u32,
    pub severity: Severity,
}

impl PerformanceFinding {
    pub fn new(issue: PerformanceIssue, line_number: u32) -> Self {
        Self {
            issue,
            impact: issue.impact().to_string(),
            solution: issue.solution().to_string(),
            code_example: Some(issue.code_example().to_string()),
            line_number,
            severity: issue.severity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryFinding {
    pub category: AdvisoryCategory,
    pub current: String,
    pub recommended: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationFinding {
    #[serde(rename = "type")]
    pub category: RecommendationCategory,
    /// In `[0.0, 1.0]`.
    pub confidence: f64,
    pub recommendation: String,
    pub auto_fix_code: Option<String>,
}

/// Which branch of the pipeline produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Parsed,
    ParseFailed,
}

/// Analysis of one source file.
///
/// Built once by `analyze` and read-only afterwards: fields are private and
/// the score and grade are derived at construction, so they cannot drift
/// apart from the findings. List fields are always present, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    file_path: String,
    status: AnalysisStatus,
    security_issues: Vec<SecurityFinding>,
    performance_hints: Vec<PerformanceFinding>,
    best_practices: Vec<AdvisoryFinding>,
    recommendations: Vec<RecommendationFinding>,
    complexity_score: u32,
    quality_score: u32,
    quality_grade: QualityGrade,
    analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub(crate) fn parsed(
        file_path: &str,
        rules: RuleOutput,
        complexity_score: u32,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        let quality_score = quality_score(&rules.performance);
        Self {
            file_path: file_path.to_string(),
            status: AnalysisStatus::Parsed,
            security_issues: rules.security,
            performance_hints: rules.performance,
            best_practices: rules.advisories,
            recommendations: rules.recommendations,
            complexity_score,
            quality_score,
            quality_grade: QualityGrade::from_score(quality_score),
            analyzed_at,
        }
    }

    /// Only the synthetic syntax-error finding; score and grade keep their
    /// zero-finding values.
    pub(crate) fn parse_failed(
        file_path: &str,
        err: &SyntaxError,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            file_path: file_path.to_string(),
            status: AnalysisStatus::ParseFailed,
            security_issues: vec![SecurityFinding::syntax_error(err)],
            performance_hints: Vec::new(),
            best_practices: Vec::new(),
            recommendations: Vec::new(),
            complexity_score: 0,
            quality_score: BASE_SCORE,
            quality_grade: QualityGrade::from_score(BASE_SCORE),
            analyzed_at,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn security_issues(&self) -> &[SecurityFinding] {
        &self.security_issues
    }

    pub fn performance_hints(&self) -> &[PerformanceFinding] {
        &self.performance_hints
    }

    pub fn best_practices(&self) -> &[AdvisoryFinding] {
        &self.best_practices
    }

    pub fn recommendations(&self) -> &[RecommendationFinding] {
        &self.recommendations
    }

    pub fn complexity_score(&self) -> u32 {
        self.complexity_score
    }

    pub fn quality_score(&self) -> u32 {
        self.quality_score
    }

    pub fn quality_grade(&self) -> QualityGrade {
        self.quality_grade
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }

    /// Security plus performance findings; the ones with a severity.
    pub fn issue_count(&self) -> usize {
        self.security_issues.len() + self.performance_hints.len()
    }
}

/// Source file metadata bound to an analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceInfo {
    pub path: String,
    pub size_bytes: u64,
    pub hash: SourceHash,
}

impl SourceInfo {
    /// Metadata for text that did not come from disk.
    pub fn from_text(path: &str, text: &str) -> Self {
        Self {
            path: path.to_string(),
            size_bytes: text.len() as u64,
            hash: SourceHash::sha256(text.as_bytes()),
        }
    }
}

/// Content fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceHash {
    pub algorithm: String,
    pub value: String,
}

impl SourceHash {
    pub fn sha256(bytes: &[u8]) -> Self {
        use sha2::{Digest, Sha256};

        Self {
            algorithm: "sha256".to_string(),
            value: hex::encode(Sha256::digest(bytes)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub source: SourceInfo,
    pub analysis: AnalysisResult,
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// Aggregate counts across all analyzed files.
///
/// `critical_issues` and `high_issues` count performance findings only, the
/// ones that feed the score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub files_analyzed: usize,
    pub security_issues: usize,
    pub performance_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub total_issues: usize,
    /// Integer mean of per-file quality scores; 100 when no files.
    pub average_score: u32,
}

impl Summary {
    pub fn from_files(files: &[FileAnalysis]) -> Self {
        let mut summary = Summary {
            files_analyzed: files.len(),
            ..Default::default()
        };

        let mut score_total: u64 = 0;
        for f in files {
            let a = &f.analysis;
            summary.security_issues += a.security_issues().len();
            summary.performance_issues += a.performance_hints().len();

            for severity in a.performance_hints().iter().map(|p| p.severity) {
                match severity {
                    Severity::Critical => summary.critical_issues += 1,
                    Severity::High => summary.high_issues += 1,
                    Severity::Medium | Severity::Low => {}
                }
            }

            score_total += u64::from(a.quality_score());
        }

        summary.total_issues = summary.security_issues + summary.performance_issues;
        summary.average_score = if files.is_empty() {
            BASE_SCORE
        } else {
            (score_total / files.len() as u64) as u32
        };

        summary
    }
}

/// Top-level report over a set of files.
///
/// Deterministic for identical inputs apart from the per-file timestamps:
/// files are sorted by path regardless of analysis order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub rule_catalog_version: String,
    pub tool: ToolInfo,
    pub summary: Summary,
    pub gate: GateInfo,
    pub files: Vec<FileAnalysis>,
}

impl Report {
    pub fn new(tool: ToolInfo, mut files: Vec<FileAnalysis>, gate: GateInfo) -> Self {
        sort_files_by_path(&mut files);

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            rule_catalog_version: RULE_CATALOG_VERSION.to_string(),
            tool,
            summary: Summary::from_files(&files),
            gate,
            files,
        }
    }
}
