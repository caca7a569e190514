use crate::report::model::{
    AdvisoryFinding, PerformanceFinding, RecommendationFinding, SecurityFinding,
};
use crate::rules::{advisory, performance, recommend, security};
use crate::syntax::scan::TreeFacts;

/// Output of every rule family for one parsed file, in registry order.
#[derive(Debug, Clone, Default)]
pub struct RuleOutput {
    pub security: Vec<SecurityFinding>,
    pub performance: Vec<PerformanceFinding>,
    pub advisories: Vec<AdvisoryFinding>,
    pub recommendations: Vec<RecommendationFinding>,
}

/// Runs all rule families against one file's text and tree facts.
///
/// Rules are independent total functions; none can fail and none sees
/// another's output.
pub fn evaluate_rules(facts: &TreeFacts, text: &str, path: &str) -> RuleOutput {
    RuleOutput {
        security: security::detect_security_issues(text),
        performance: performance::detect_performance_issues(facts, text),
        advisories: advisory::suggest_best_practices(text),
        recommendations: recommend::generate_recommendations(text, path),
    }
}
