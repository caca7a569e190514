use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::report::model::{SourceHash, SourceInfo};

/// Source file read from disk, ready for analysis.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Display path, also used as the analysis' virtual path.
    pub path: String,

    /// Exact text read from disk.
    pub text: String,

    pub size_bytes: u64,

    pub hash: SourceHash,
}

impl SourceContext {
    /// Report-facing metadata. Drops the text.
    pub fn into_source_info(self) -> SourceInfo {
        SourceInfo {
            path: self.path,
            size_bytes: self.size_bytes,
            hash: self.hash,
        }
    }
}

/// Read a Go source file and fingerprint its bytes.
///
/// The fingerprint depends only on file content; filesystem metadata is
/// ignored.
pub fn read_source(path: &Path) -> Result<SourceContext> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read source: {}", path.display()))?;

    let hash = SourceHash::sha256(&bytes);
    let size_bytes = bytes.len() as u64;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("source is not valid UTF-8: {}", path.display()))?;

    Ok(SourceContext {
        path: path.display().to_string(),
        text,
        size_bytes,
        hash,
    })
}
