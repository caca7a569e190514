use std::path::PathBuf;

use apiscan_core::rules::catalog::Severity;
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "apiscan",
    version,
    about = "Static performance and security analysis for Go HTTP services"
)]
pub struct Args {
    /// Go files or directories to analyze
    #[arg(env = "INPUT_CODE_PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, env = "INPUT_OUTPUT_FORMAT", default_value = "json")]
    pub format: OutputFormat,

    /// Lowest severity that counts against the gate
    #[arg(long, env = "INPUT_SEVERITY_THRESHOLD", default_value = "medium")]
    pub threshold: Severity,

    /// Exit with status 1 when a finding reaches the threshold
    #[arg(long, env = "INPUT_FAIL_ON_ISSUES")]
    pub fail_on_issues: bool,

    /// Source dialect hint
    #[arg(long, default_value = "go")]
    pub dialect: String,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,

    /// Log per-file progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Markdown,
    Github,
    Sarif,
}
