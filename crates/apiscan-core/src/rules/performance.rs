//! Performance rules.
//!
//! Two sources of evidence:
//! - structural: loops whose subtree contains a data-access call (one
//!   finding per loop, at the loop's line)
//! - lexical: whole-file pattern tests, each firing at most once
//!
//! The lexical `.Related(` check can report the same defect as the loop
//! scan. Both findings are kept.

use std::sync::OnceLock;

use regex::Regex;

use crate::report::model::PerformanceFinding;
use crate::rules::catalog::{
    BULK_FETCH_CALLS, CACHE_MARKERS, DB_OPEN_CALLS, EXPENSIVE_OPERATIONS, LIMIT_MARKERS,
    POOL_CONFIG_MARKER, PerformanceIssue, RELATED_FETCH_CALL, SERIALIZE_CALLS,
    UNINDEXED_FILTER_PATTERNS,
};
use crate::rules::text::{TextRule, contains_any, first_line_of_any, line_at};
use crate::syntax::scan::{LoopKind, TreeFacts};

static LOOP_KEYWORD: OnceLock<Regex> = OnceLock::new();
static SLICE_STORE: OnceLock<Regex> = OnceLock::new();
static PACKAGE_VAR: OnceLock<Regex> = OnceLock::new();
static APPEND_ASSIGN: OnceLock<Regex> = OnceLock::new();

fn loop_keyword() -> &'static Regex {
    LOOP_KEYWORD.get_or_init(|| Regex::new(r"\bfor\b").expect("valid regex"))
}

/// Package-level slice literal used as a data store: `var albums = []Album{`.
fn slice_store() -> &'static Regex {
    SLICE_STORE.get_or_init(|| {
        Regex::new(r"(?m)^var\s+\w+\s*=\s*\[\][\w.*]+\s*\{").expect("valid regex")
    })
}

fn package_var() -> &'static Regex {
    PACKAGE_VAR.get_or_init(|| Regex::new(r"(?m)^var\s+(\w+)").expect("valid regex"))
}

/// `xs = append(xs, ...)`, indentation allowed.
fn append_assign() -> &'static Regex {
    APPEND_ASSIGN.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*(\w+)\s*=\s*append\(\s*(\w+)\s*,").expect("valid regex")
    })
}

/// Registry of lexical performance rules, evaluated in order.
pub static PERFORMANCE_RULES: &[TextRule<PerformanceIssue>] = &[
    TextRule {
        kind: PerformanceIssue::RelatedInLoop,
        check: related_near_loop,
    },
    TextRule {
        kind: PerformanceIssue::MissingIndex,
        check: unindexed_filter,
    },
    TextRule {
        kind: PerformanceIssue::UnpaginatedPayload,
        check: unpaginated_payload,
    },
    TextRule {
        kind: PerformanceIssue::MissingCache,
        check: uncached_expensive_operation,
    },
    TextRule {
        kind: PerformanceIssue::InMemoryStorage,
        check: in_memory_store,
    },
    TextRule {
        kind: PerformanceIssue::NoConnectionPooling,
        check: unpooled_connection,
    },
];

pub fn detect_performance_issues(facts: &TreeFacts, text: &str) -> Vec<PerformanceFinding> {
    let mut findings: Vec<PerformanceFinding> = facts
        .loops
        .iter()
        .filter(|l| l.has_data_access)
        .map(|l| {
            let issue = match l.kind {
                LoopKind::Counted => PerformanceIssue::CountedLoopQuery,
                LoopKind::Range => PerformanceIssue::RangeLoopQuery,
            };
            PerformanceFinding::new(issue, l.line)
        })
        .collect();

    findings.extend(PERFORMANCE_RULES.iter().filter_map(|rule| {
        (rule.check)(text).map(|line| PerformanceFinding::new(rule.kind, line))
    }));

    findings
}

fn related_near_loop(text: &str) -> Option<u32> {
    if !loop_keyword().is_match(text) {
        return None;
    }
    first_line_of_any(text, &[RELATED_FETCH_CALL])
}

fn unindexed_filter(text: &str) -> Option<u32> {
    first_line_of_any(text, UNINDEXED_FILTER_PATTERNS)
}

fn unpaginated_payload(text: &str) -> Option<u32> {
    if !contains_any(text, SERIALIZE_CALLS) || contains_any(text, LIMIT_MARKERS) {
        return None;
    }
    first_line_of_any(text, BULK_FETCH_CALLS)
}

fn uncached_expensive_operation(text: &str) -> Option<u32> {
    if contains_any(text, CACHE_MARKERS) {
        return None;
    }
    first_line_of_any(text, EXPENSIVE_OPERATIONS)
}

/// A package-level slice used as a data store: either initialized from a
/// slice literal or grown with `append`.
fn in_memory_store(text: &str) -> Option<u32> {
    let literal = slice_store().find(text).map(|m| m.start());
    literal
        .into_iter()
        .chain(package_append(text))
        .min()
        .map(|offset| line_at(text, offset))
}

/// Offset of the first `name = append(name, ...)` on a package-level var.
fn package_append(text: &str) -> Option<usize> {
    let globals: Vec<&str> = package_var()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    if globals.is_empty() {
        return None;
    }

    append_assign()
        .captures_iter(text)
        .find(|c| c[1] == c[2] && globals.contains(&&c[1]))
        .and_then(|c| c.get(0))
        .map(|m| m.start())
}

fn unpooled_connection(text: &str) -> Option<u32> {
    if text.contains(POOL_CONFIG_MARKER) {
        return None;
    }
    first_line_of_any(text, DB_OPEN_CALLS)
}
