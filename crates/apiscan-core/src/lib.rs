pub mod error;
pub mod report;
pub mod rules;
pub mod source;
pub mod syntax;
pub mod util;

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, trace, warn};

use crate::report::model::{AnalysisResult, FileAnalysis};
use crate::rules::{eval, score};

pub const TOOL_NAME: &str = "apiscan";

/// JSON schema version of apiscan reports.
/// Bump only when the serialized shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

pub const RULE_CATALOG_VERSION: &str = "0.1.0";

/// Analyze one Go source file.
///
/// `path` is informational; nothing is read from disk. `dialect` is an
/// extensibility hint and unknown values are accepted.
///
/// Never fails: a structural parse failure becomes a single `syntax_error`
/// finding and every other rule family is skipped.
pub fn analyze(source: &str, dialect: &str, path: &str) -> AnalysisResult {
    trace!(path, dialect, "analyzing");
    let analyzed_at = Utc::now();

    let tree = match syntax::parse(source) {
        Ok(tree) => tree,
        Err(err) => {
            warn!(path, error = %err, "structural parse failed");
            return AnalysisResult::parse_failed(path, &err, analyzed_at);
        }
    };

    let facts = syntax::scan::scan_tree(&tree);
    let rules = eval::evaluate_rules(&facts, source, path);
    let result = AnalysisResult::parsed(path, rules, score::complexity(&facts), analyzed_at);

    debug!(
        path,
        security = result.security_issues().len(),
        performance = result.performance_hints().len(),
        complexity = result.complexity_score(),
        score = result.quality_score(),
        "analysis complete"
    );

    result
}

/// Read a file from disk and analyze it.
///
/// Fails only on I/O or encoding errors; parse failures are reported inside
/// the analysis.
pub fn inspect(path: &Path, dialect: &str) -> Result<FileAnalysis> {
    let ctx = source::read_source(path)?;
    let analysis = analyze(&ctx.text, dialect, &ctx.path);

    Ok(FileAnalysis {
        source: ctx.into_source_info(),
        analysis,
    })
}
