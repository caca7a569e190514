//! Lexical helpers shared by the text-based rules.
//!
//! Matching is plain, case-sensitive substring search. Line numbers are
//! 1-based and point at the earliest occurrence.

use crate::rules::catalog::HTTP_SURFACE_MARKERS;

/// One lexical rule: the finding kind it produces and the check deciding
/// whether it fires.
///
/// `check` returns the line of the evidence when the rule fires, `Some(0)`
/// for file-level findings, and `None` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct TextRule<K: 'static> {
    pub kind: K,
    pub check: fn(&str) -> Option<u32>,
}

pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Line of the earliest occurrence of any needle.
pub fn first_line_of_any(text: &str, needles: &[&str]) -> Option<u32> {
    needles
        .iter()
        .filter_map(|n| text.find(n))
        .min()
        .map(|offset| line_at(text, offset))
}

/// 1-based line containing byte `offset`.
pub fn line_at(text: &str, offset: usize) -> u32 {
    let end = offset.min(text.len());
    let newlines = text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count();
    newlines as u32 + 1
}

/// Whether the file looks like it serves HTTP. Service-level rules (CORS,
/// advisories, recommendations) only apply to such files.
pub fn exposes_http_surface(text: &str) -> bool {
    contains_any(text, HTTP_SURFACE_MARKERS)
}
