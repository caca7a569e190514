use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use tracing::debug;

const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

/// Expand the command-line paths into the Go files to analyze.
///
/// Explicit file arguments are taken as given. Directories are walked
/// honoring `.gitignore`; only non-test `.go` files outside vendored and
/// test-data trees are kept. The result is sorted and deduplicated.
pub fn collect_go_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("path does not exist: {}", root.display());
        }

        let walker = WalkBuilder::new(root)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !(entry.file_type().is_some_and(|t| t.is_dir())
                    && SKIPPED_DIRS.contains(&name.as_ref()))
            })
            .build();

        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if entry.file_type().is_some_and(|t| t.is_file()) && is_analyzable(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), "collected source files");
    Ok(files)
}

fn is_analyzable(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}
