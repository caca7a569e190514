use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use apiscan_core::inspect;
use apiscan_core::report::model::{FileAnalysis, Report, ToolInfo};
use apiscan_core::report::render;
use apiscan_core::rules::gate::evaluate_gate;

mod args;
mod walk;

use args::OutputFormat;

fn main() -> Result<()> {
    let args = args::Args::parse();
    init_tracing(args.verbose);

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };

    let paths = walk::collect_go_files(&args.paths)?;
    if paths.is_empty() {
        warn!("no Go files found");
    }

    let files = paths
        .par_iter()
        .map(|path| inspect(path, &args.dialect))
        .collect::<Result<Vec<FileAnalysis>>>()?;

    let gate = evaluate_gate(&files, args.threshold, args.fail_on_issues);
    let report = Report::new(tool, files, gate);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Text => render::render_text(&report),
        OutputFormat::Markdown => render::render_markdown(&report),
        OutputFormat::Github => render::render_github(&report),
        OutputFormat::Sarif => serde_json::to_string_pretty(&render::render_sarif(&report))?,
    };

    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => print!("{output}"),
    }

    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        write_action_outputs(&path, &report)?;
    }

    info!(
        files = report.summary.files_analyzed,
        issues = report.summary.total_issues,
        score = report.summary.average_score,
        "analysis complete"
    );

    if report.gate.exit_code != 0 {
        warn!(
            threshold = %report.gate.threshold,
            findings = report.gate.findings_at_or_above,
            "issues found at or above threshold"
        );
    }

    std::process::exit(report.gate.exit_code);
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Append step outputs for GitHub Actions.
fn write_action_outputs(path: &str, report: &Report) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open GITHUB_OUTPUT: {path}"))?;

    let s = &report.summary;
    writeln!(file, "issues-found={}", s.total_issues)?;
    writeln!(file, "performance-score={}", s.average_score)?;
    writeln!(file, "files-analyzed={}", s.files_analyzed)?;
    writeln!(file, "analysis-results={}", serde_json::to_string(&report.files)?)?;
    Ok(())
}
