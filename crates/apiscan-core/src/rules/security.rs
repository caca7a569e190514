//! Security rules.
//!
//! Every rule is a whole-file lexical test. Matching is coarse:
//! a keyword hit is reported even when the surrounding code is safe.

use crate::report::model::SecurityFinding;
use crate::rules::catalog::{
    BAD_REQUEST_MARKERS, CORS_MARKERS, DML_KEYWORDS, JSON_BINDING_CALLS, PARAMETERIZED_MARKERS,
    SECRET_KEYWORDS, SecurityCategory,
};
use crate::rules::text::{TextRule, contains_any, exposes_http_surface, first_line_of_any};

/// Registry of security rules, evaluated in order.
pub static SECURITY_RULES: &[TextRule<SecurityCategory>] = &[
    TextRule {
        kind: SecurityCategory::MissingCors,
        check: missing_cors,
    },
    TextRule {
        kind: SecurityCategory::InsufficientErrorHandling,
        check: unchecked_json_binding,
    },
    TextRule {
        kind: SecurityCategory::PotentialHardcodedSecrets,
        check: secret_keyword,
    },
    TextRule {
        kind: SecurityCategory::SqlInjectionRisk,
        check: unparameterized_sql,
    },
];

pub fn detect_security_issues(text: &str) -> Vec<SecurityFinding> {
    SECURITY_RULES
        .iter()
        .filter_map(|rule| (rule.check)(text).map(|line| SecurityFinding::new(rule.kind, line)))
        .collect()
}

fn missing_cors(text: &str) -> Option<u32> {
    (exposes_http_surface(text) && !contains_any(text, CORS_MARKERS)).then_some(0)
}

fn unchecked_json_binding(text: &str) -> Option<u32> {
    if contains_any(text, BAD_REQUEST_MARKERS) {
        return None;
    }
    first_line_of_any(text, JSON_BINDING_CALLS)
}

fn secret_keyword(text: &str) -> Option<u32> {
    first_line_of_any(text, SECRET_KEYWORDS)
}

fn unparameterized_sql(text: &str) -> Option<u32> {
    if contains_any(text, PARAMETERIZED_MARKERS) {
        return None;
    }
    first_line_of_any(text, DML_KEYWORDS)
}
