#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn apiscan_cmd() -> Command {
    let mut cmd = Command::cargo_bin("apiscan").expect("binary should be built");
    for var in [
        "INPUT_CODE_PATH",
        "INPUT_OUTPUT_FORMAT",
        "INPUT_SEVERITY_THRESHOLD",
        "INPUT_FAIL_ON_ISSUES",
        "GITHUB_OUTPUT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn json_for(args: &[&str]) -> serde_json::Value {
    let output = apiscan_cmd()
        .args(args)
        .output()
        .expect("command should run");
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn service() -> String {
    fixtures_dir().join("service").display().to_string()
}

fn service_main() -> String {
    fixtures_dir().join("service/main.go").display().to_string()
}

fn clean() -> String {
    fixtures_dir().join("clean").display().to_string()
}

#[test]
fn clean_directory_exits_0() {
    apiscan_cmd()
        .arg(clean())
        .arg("--fail-on-issues")
        .assert()
        .code(0);
}

#[test]
fn findings_without_fail_flag_exit_0() {
    apiscan_cmd().arg(service()).assert().code(0);
}

#[test]
fn findings_with_fail_flag_exit_1() {
    apiscan_cmd()
        .arg(service())
        .arg("--fail-on-issues")
        .assert()
        .code(1);
}

#[test]
fn threshold_above_findings_passes() {
    // Only medium findings in this file.
    apiscan_cmd()
        .arg(service_main())
        .args(["--fail-on-issues", "--threshold", "high"])
        .assert()
        .code(0);

    apiscan_cmd()
        .arg(service_main())
        .args(["--fail-on-issues", "--threshold", "medium"])
        .assert()
        .code(1);
}

#[test]
fn env_fallbacks_configure_the_gate() {
    apiscan_cmd()
        .env("INPUT_CODE_PATH", service())
        .env("INPUT_FAIL_ON_ISSUES", "true")
        .env("INPUT_SEVERITY_THRESHOLD", "critical")
        .assert()
        .code(1);

    apiscan_cmd()
        .env("INPUT_CODE_PATH", service_main())
        .env("INPUT_FAIL_ON_ISSUES", "true")
        .env("INPUT_SEVERITY_THRESHOLD", "critical")
        .assert()
        .code(0);
}

#[test]
fn env_output_format_is_used() {
    apiscan_cmd()
        .env("INPUT_OUTPUT_FORMAT", "markdown")
        .arg(clean())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# API Performance Analysis Report"));
}

#[test]
fn walker_skips_tests_vendor_and_testdata() {
    let parsed = json_for(&[&service()]);

    let paths: Vec<&str> = parsed["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["source"]["path"].as_str().unwrap())
        .collect();

    assert_eq!(paths.len(), 2, "{paths:?}");
    assert!(paths[0].ends_with("main.go"));
    assert!(paths[1].ends_with("orders.go"));
}

#[test]
fn json_output_has_report_sections() {
    let parsed = json_for(&[&service()]);

    assert_eq!(parsed["schema_version"], "0.1.0");
    assert_eq!(parsed["rule_catalog_version"], "0.1.0");
    assert!(parsed.get("tool").is_some());
    assert!(parsed.get("summary").is_some());
    assert!(parsed.get("gate").is_some());
    assert!(parsed.get("files").is_some());
}

#[test]
fn json_summary_counts_service_findings() {
    let parsed = json_for(&[&service()]);
    let summary = &parsed["summary"];

    assert_eq!(summary["files_analyzed"], 2);
    assert_eq!(summary["security_issues"], 2);
    assert_eq!(summary["performance_issues"], 2);
    assert_eq!(summary["critical_issues"], 1);
    assert_eq!(summary["total_issues"], 4);
    // (90 + 75) / 2
    assert_eq!(summary["average_score"], 82);

    assert_eq!(parsed["gate"]["threshold"], "medium");
    assert_eq!(parsed["gate"]["highest_severity"], "critical");
    assert_eq!(parsed["gate"]["exceeded"], true);
    assert_eq!(parsed["gate"]["exit_code"], 0);
}

#[test]
fn json_file_analysis_shape() {
    let parsed = json_for(&[&service_main()]);
    let analysis = &parsed["files"][0]["analysis"];

    assert_eq!(analysis["status"], "parsed");
    assert_eq!(analysis["quality_score"], 90);
    assert_eq!(analysis["quality_grade"], "A");
    assert_eq!(analysis["security_issues"][0]["type"], "missing_cors");
    assert_eq!(analysis["performance_hints"][0]["issue"], "In-memory data storage");
    assert_eq!(analysis["recommendations"].as_array().unwrap().len(), 4);
    assert!(analysis["analyzed_at"].is_string());

    let hash = parsed["files"][0]["source"]["hash"]["value"]
        .as_str()
        .unwrap();
    assert_eq!(hash.len(), 64, "SHA-256 hex should be 64 chars");
}

#[test]
fn json_tool_info_reflects_binary() {
    let parsed = json_for(&[&clean()]);
    assert_eq!(parsed["tool"]["name"], "apiscan-cli");
    assert_eq!(parsed["tool"]["version"], "0.1.0");
    assert!(parsed["tool"]["commit"].is_null());
}

#[test]
fn commit_flag_embeds_hash_in_report() {
    let parsed = json_for(&[&clean(), "--commit", "abc123def456"]);
    assert_eq!(parsed["tool"]["commit"], "abc123def456");
}

#[test]
fn text_output_lists_findings() {
    apiscan_cmd()
        .arg(service())
        .args(["--format", "text"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Files analyzed: 2"))
        .stdout(predicate::str::contains("N+1 Query in Range Loop"))
        .stdout(predicate::str::contains("missing_cors"));
}

#[test]
fn github_output_emits_annotations() {
    apiscan_cmd()
        .arg(service())
        .args(["--format", "github"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("::error file="))
        .stdout(predicate::str::contains("line=10::N+1 Query in Range Loop"))
        .stdout(predicate::str::contains("::warning file="));
}

#[test]
fn sarif_output_is_valid() {
    let parsed = json_for(&[&service(), "--format", "sarif"]);

    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "apiscan-cli");
    assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 4);
}

#[test]
fn out_flag_writes_to_file() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let out_path = tmp.path().to_path_buf();

    apiscan_cmd()
        .arg(clean())
        .arg("--out")
        .arg(&out_path)
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&out_path).expect("read output file");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("file should be JSON");
    assert_eq!(parsed["summary"]["average_score"], 100);
}

#[test]
fn github_output_file_receives_step_outputs() {
    let tmp = NamedTempFile::new().expect("create temp file");

    apiscan_cmd()
        .env("GITHUB_OUTPUT", tmp.path())
        .arg(service())
        .assert()
        .code(0);

    let contents = std::fs::read_to_string(tmp.path()).expect("read outputs");
    assert!(contents.contains("issues-found=4"));
    assert!(contents.contains("performance-score=82"));
    assert!(contents.contains("files-analyzed=2"));

    let results = contents
        .lines()
        .find_map(|l| l.strip_prefix("analysis-results="))
        .expect("analysis-results output");
    let results: serde_json::Value = serde_json::from_str(results).expect("results are JSON");
    assert_eq!(results.as_array().unwrap().len(), 2);
    assert_eq!(results[0]["analysis"]["quality_score"], 90);
}

#[test]
fn nonexistent_path_fails() {
    apiscan_cmd()
        .arg("/tmp/does_not_exist_apiscan_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn invalid_format_flag_fails() {
    apiscan_cmd()
        .arg(clean())
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn invalid_threshold_fails() {
    apiscan_cmd()
        .arg(clean())
        .args(["--threshold", "urgent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn deterministic_json_across_runs() {
    let a = json_for(&[&service()]);
    let b = json_for(&[&service()]);

    assert_eq!(a["summary"], b["summary"]);
    assert_eq!(a["gate"], b["gate"]);
    for i in 0..2 {
        let (fa, fb) = (&a["files"][i], &b["files"][i]);
        assert_eq!(fa["source"], fb["source"]);
        assert_eq!(fa["analysis"]["security_issues"], fb["analysis"]["security_issues"]);
        assert_eq!(fa["analysis"]["performance_hints"], fb["analysis"]["performance_hints"]);
        assert_eq!(fa["analysis"]["quality_score"], fb["analysis"]["quality_score"]);
    }
}

#[test]
fn help_flag_prints_usage() {
    apiscan_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Static performance and security analysis"));
}

#[test]
fn version_flag_prints_version() {
    apiscan_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apiscan"));
}

#[test]
fn default_format_is_json() {
    let output = apiscan_cmd()
        .arg(clean())
        .output()
        .expect("command should run");

    serde_json::from_slice::<serde_json::Value>(&output.stdout)
        .expect("default output should be valid JSON");
}
