//! Human and CI renderers over a finished `Report`.
//!
//! JSON output is plain `serde_json` on the report and lives with the caller.

use std::fmt::Write;

use serde_json::{Value, json};

use crate::TOOL_NAME;
use crate::report::model::Report;
use crate::rules::catalog::Severity;

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let s = &report.summary;
    let _ = writeln!(out, "{} {}", TOOL_NAME, report.tool.version);
    let _ = writeln!(out, "Files analyzed: {}", s.files_analyzed);
    let _ = writeln!(out, "Average score: {}/100", s.average_score);
    let _ = writeln!(
        out,
        "Issues: {} (performance: {} critical, {} high)",
        s.total_issues, s.critical_issues, s.high_issues
    );

    for file in &report.files {
        let a = &file.analysis;
        if a.issue_count() == 0 {
            continue;
        }
        let _ = writeln!(
            out,
            "{} [{} {}]",
            file.source.path,
            a.quality_score(),
            a.quality_grade()
        );
        for p in a.performance_hints() {
            let _ = writeln!(out, "  - {} [{}] {}", location(p.line_number), p.severity, p.issue);
        }
        for i in a.security_issues() {
            let _ = writeln!(
                out,
                "  - {} [{}] {}",
                location(i.line_number),
                i.severity,
                i.category
            );
        }
    }

    let _ = writeln!(
        out,
        "Gate: threshold {} {}",
        report.gate.threshold,
        if report.gate.exceeded { "exceeded" } else { "passed" }
    );
    out
}

fn location(line: u32) -> String {
    if line == 0 {
        "file".to_string()
    } else {
        format!("L{line}")
    }
}

pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str("# API Performance Analysis Report\n\n");
    if s.files_analyzed > 0 {
        let _ = writeln!(out, "## Overall Performance Score: {}/100\n", s.average_score);
    }

    out.push_str("| Metric | Count |\n|--------|-------|\n");
    let _ = writeln!(out, "| Files Analyzed | {} |", s.files_analyzed);
    let _ = writeln!(out, "| Critical Issues | {} |", s.critical_issues);
    let _ = writeln!(out, "| High Priority Issues | {} |", s.high_issues);
    let _ = writeln!(out, "| Performance Issues | {} |", s.performance_issues);
    let _ = writeln!(out, "| Security Issues | {} |", s.security_issues);
    let _ = writeln!(out, "| Total Issues | {} |\n", s.total_issues);

    for file in &report.files {
        let a = &file.analysis;
        if a.issue_count() == 0 {
            continue;
        }

        let _ = writeln!(out, "## {}\n", file.source.path);
        let _ = writeln!(
            out,
            "**Performance Score:** {}/100 ({})\n",
            a.quality_score(),
            a.quality_grade()
        );

        if !a.performance_hints().is_empty() {
            out.push_str("### Performance Issues\n\n");
            for p in a.performance_hints() {
                let _ = writeln!(out, "#### [{}] {}", p.severity, p.issue);
                let _ = writeln!(out, "**Impact:** {}\n", p.impact);
                let _ = writeln!(out, "**Solution:** {}\n", p.solution);
                if p.line_number > 0 {
                    let _ = writeln!(out, "**Line:** {}\n", p.line_number);
                }
                if let Some(example) = &p.code_example {
                    let _ = writeln!(out, "```go\n{example}\n```\n");
                }
            }
        }

        if !a.security_issues().is_empty() {
            out.push_str("### Security Issues\n\n");
            for i in a.security_issues() {
                let title = i.category.as_str().replace('_', " ");
                let _ = writeln!(out, "#### [{}] {}", i.severity, title);
                let _ = writeln!(out, "**Description:** {}\n", i.description);
                let _ = writeln!(out, "**Suggestion:** {}\n", i.suggestion);
                if i.line_number > 0 {
                    let _ = writeln!(out, "**Line:** {}\n", i.line_number);
                }
            }
        }

        out.push_str("---\n\n");
    }

    if s.total_issues == 0 {
        out.push_str("## No issues detected\n\n");
    }
    out
}

/// GitHub Actions workflow-command annotations, one line per finding.
pub fn render_github(report: &Report) -> String {
    let mut out = String::new();

    for file in &report.files {
        let a = &file.analysis;
        let path = escape_property(&file.source.path);

        for p in a.performance_hints() {
            let message = escape_data(&format!("{}: {}", p.issue, p.impact));
            let level = annotation_level(p.severity);
            let line = p.line_number.max(1);
            let _ = writeln!(out, "::{level} file={path},line={line}::{message}");
        }
        for i in a.security_issues() {
            let message = escape_data(&format!("{}: {}", i.category, i.description));
            let level = annotation_level(i.severity);
            let line = i.line_number.max(1);
            let _ = writeln!(out, "::{level} file={path},line={line}::{message}");
        }
    }
    out
}

/// Workflow-command message escaping.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Property values additionally escape the `,` and `:` separators.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

fn annotation_level(severity: Severity) -> &'static str {
    if severity >= Severity::High {
        "error"
    } else {
        "warning"
    }
}

/// SARIF 2.1.0 log with one run.
pub fn render_sarif(report: &Report) -> Value {
    let mut results = Vec::new();

    for file in &report.files {
        let a = &file.analysis;
        let path = &file.source.path;

        for p in a.performance_hints() {
            results.push(sarif_result(
                format!("performance/{}", p.issue.name().replace(' ', "_")),
                p.severity,
                &p.impact,
                path,
                p.line_number,
            ));
        }
        for i in a.security_issues() {
            results.push(sarif_result(
                format!("security/{}", i.category),
                i.severity,
                &i.description,
                path,
                i.line_number,
            ));
        }
    }

    json!({
        "version": "2.1.0",
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
        "runs": [{
            "tool": {
                "driver": {
                    "name": report.tool.name,
                    "version": report.tool.version,
                }
            },
            "results": results,
        }]
    })
}

fn sarif_result(
    rule_id: String,
    severity: Severity,
    message: &str,
    path: &str,
    line: u32,
) -> Value {
    json!({
        "ruleId": rule_id,
        "level": sarif_level(severity),
        "message": { "text": message },
        "locations": [{
            "physicalLocation": {
                "artifactLocation": { "uri": path },
                "region": { "startLine": line.max(1) }
            }
        }]
    })
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;
    use crate::report::model::{FileAnalysis, SourceInfo, ToolInfo};
    use crate::rules::gate::evaluate_gate;

    const N_PLUS_ONE: &str = "package main\nfunc f(users []User) {\n\tfor _, u := range users {\n\t\tdb.First(&u)\n\t}\n}\n";

    fn report(files: &[(&str, &str)]) -> Report {
        let files: Vec<FileAnalysis> = files
            .iter()
            .map(|(path, text)| FileAnalysis {
                source: SourceInfo::from_text(path, text),
                analysis: analyze(text, "go", path),
            })
            .collect();
        let gate = evaluate_gate(&files, Severity::Medium, true);
        Report::new(
            ToolInfo {
                name: "apiscan".into(),
                version: "0.1.0".into(),
                commit: None,
            },
            files,
            gate,
        )
    }

    #[test]
    fn text_lists_findings_with_locations() {
        let out = render_text(&report(&[("svc.go", N_PLUS_ONE)]));
        assert!(out.contains("svc.go [75 C]"), "{out}");
        assert!(out.contains("L3 [critical] N+1 Query in Range Loop"), "{out}");
        assert!(out.contains("exceeded"));
    }

    #[test]
    fn markdown_reports_clean_run() {
        let out = render_markdown(&report(&[("ok.go", "package main\n")]));
        assert!(out.contains("Overall Performance Score: 100/100"));
        assert!(out.contains("No issues detected"));
    }

    #[test]
    fn markdown_includes_code_example() {
        let out = render_markdown(&report(&[("svc.go", N_PLUS_ONE)]));
        assert!(out.contains("```go"));
        assert!(out.contains("**Line:** 3"));
    }

    #[test]
    fn github_annotations_clamp_line_to_one() {
        let out = render_github(&report(&[("bad.go", "this is not valid code")]));
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("::error file=bad.go,line=1::syntax_error"), "{out}");
    }

    #[test]
    fn github_medium_is_warning() {
        let out = render_github(&report(&[("m.go", "package main\nvar xs = []Item{}\n")]));
        assert!(out.starts_with("::warning file=m.go,line=2::In-memory data storage"), "{out}");
    }

    #[test]
    fn github_escapes_separators_in_path_and_message() {
        let out = render_github(&report(&[("dir,v2/a:b%.go", "this is not valid code")]));
        assert!(
            out.starts_with("::error file=dir%2Cv2/a%3Ab%25.go,line=1::syntax_error: "),
            "{out}"
        );
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn escape_data_encodes_newlines_and_percent() {
        assert_eq!(escape_data("50%\r\nnext"), "50%25%0D%0Anext");
        assert_eq!(escape_property("a,b:c"), "a%2Cb%3Ac");
    }

    #[test]
    fn sarif_has_rule_ids_and_levels() {
        let sarif = render_sarif(&report(&[("svc.go", N_PLUS_ONE)]));
        assert_eq!(sarif["version"], "2.1.0");
        let results = sarif["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["ruleId"], "performance/N+1_Query_in_Range_Loop");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["region"]["startLine"],
            3
        );
    }
}
