//! Best-practice advisories for HTTP services. Never scored.

use std::sync::OnceLock;

use regex::Regex;

use crate::report::model::AdvisoryFinding;
use crate::rules::catalog::AdvisoryCategory;
use crate::rules::text::exposes_http_surface;

static HARDCODED_ADDR: OnceLock<Regex> = OnceLock::new();

fn hardcoded_addr() -> &'static Regex {
    HARDCODED_ADDR.get_or_init(|| {
        Regex::new(r#"(?:\.Run|ListenAndServe)\(\s*"[\w.\-]*:\d+""#).expect("valid regex")
    })
}

struct AdvisoryRule {
    category: AdvisoryCategory,
    current: &'static str,
    recommended: &'static str,
    reasoning: &'static str,
    applies: fn(&str) -> bool,
}

static ADVISORY_RULES: &[AdvisoryRule] = &[
    AdvisoryRule {
        category: AdvisoryCategory::ErrorHandling,
        current: "Basic error handling",
        recommended: "Structured error responses with proper HTTP status codes",
        reasoning: "Better client experience, easier debugging, API consistency",
        applies: |_| true,
    },
    AdvisoryRule {
        category: AdvisoryCategory::RequestValidation,
        current: "No input validation middleware",
        recommended: "Add request validation and sanitization",
        reasoning: "Prevent invalid data, improve security, reduce debugging time",
        applies: |text| !text.contains("middleware"),
    },
    AdvisoryRule {
        category: AdvisoryCategory::Logging,
        current: "No structured logging",
        recommended: "Add request/response logging with correlation IDs",
        reasoning: "Essential for debugging production issues and monitoring",
        applies: |text| !text.contains("Logger"),
    },
    AdvisoryRule {
        category: AdvisoryCategory::Configuration,
        current: "Hardcoded port and host",
        recommended: "Use environment variables for configuration",
        reasoning: "Enables different environments (dev, staging, prod)",
        applies: |text| hardcoded_addr().is_match(text),
    },
];

pub fn suggest_best_practices(text: &str) -> Vec<AdvisoryFinding> {
    if !exposes_http_surface(text) {
        return Vec::new();
    }

    ADVISORY_RULES
        .iter()
        .filter(|rule| (rule.applies)(text))
        .map(|rule| AdvisoryFinding {
            category: rule.category,
            current: rule.current.to_string(),
            recommended: rule.recommended.to_string(),
            reasoning: rule.reasoning.to_string(),
        })
        .collect()
}
