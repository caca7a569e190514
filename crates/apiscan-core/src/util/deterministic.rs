//! Deterministic ordering helpers.
//!
//! Files may be analyzed in any order (the CLI fans out across threads).
//! These helpers restore a stable order so identical inputs always produce
//! identical reports.

use crate::report::model::FileAnalysis;

/// Sort analyzed files by source path.
pub fn sort_files_by_path(files: &mut [FileAnalysis]) {
    files.sort_by(|a, b| a.source.path.cmp(&b.source.path));
}
