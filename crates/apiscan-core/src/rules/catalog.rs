//! Fixed rule catalogue.
//!
//! Severity levels, the closed set of finding kinds per rule family, and the
//! keyword lists the rules match against. Everything here is `'static` and
//! read-only for the lifetime of the process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseSeverityError;

/// Finding severity. Ordering is semantic: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Points subtracted from the quality score per performance finding.
    pub fn weight(self) -> u32 {
        match self {
            Severity::Critical => 25,
            Severity::High => 15,
            Severity::Medium => 10,
            Severity::Low => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Security finding categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityCategory {
    MissingCors,
    InsufficientErrorHandling,
    PotentialHardcodedSecrets,
    SqlInjectionRisk,
    SyntaxError,
}

impl SecurityCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityCategory::MissingCors => "missing_cors",
            SecurityCategory::InsufficientErrorHandling => "insufficient_error_handling",
            SecurityCategory::PotentialHardcodedSecrets => "potential_hardcoded_secrets",
            SecurityCategory::SqlInjectionRisk => "sql_injection_risk",
            SecurityCategory::SyntaxError => "syntax_error",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            SecurityCategory::MissingCors | SecurityCategory::InsufficientErrorHandling => {
                Severity::Medium
            }
            SecurityCategory::PotentialHardcodedSecrets
            | SecurityCategory::SqlInjectionRisk
            | SecurityCategory::SyntaxError => Severity::High,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SecurityCategory::MissingCors => {
                "No CORS middleware detected - this can cause browser security issues"
            }
            SecurityCategory::InsufficientErrorHandling => {
                "JSON binding without proper error responses"
            }
            SecurityCategory::PotentialHardcodedSecrets => "Potential hardcoded secrets detected",
            SecurityCategory::SqlInjectionRisk => {
                "Raw SQL queries detected - potential injection risk"
            }
            SecurityCategory::SyntaxError => "Code contains syntax errors",
        }
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            SecurityCategory::MissingCors => "Add CORS middleware: router.Use(cors.Default())",
            SecurityCategory::InsufficientErrorHandling => {
                "Return proper HTTP error codes for invalid JSON"
            }
            SecurityCategory::PotentialHardcodedSecrets => {
                "Use environment variables for sensitive data"
            }
            SecurityCategory::SqlInjectionRisk => {
                "Use parameterized queries or ORM with proper escaping"
            }
            SecurityCategory::SyntaxError => "Fix syntax errors before analysis",
        }
    }
}

impl fmt::Display for SecurityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance issues. Serialized by their human-readable issue name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceIssue {
    #[serde(rename = "Potential N+1 Query Pattern")]
    CountedLoopQuery,
    #[serde(rename = "N+1 Query in Range Loop")]
    RangeLoopQuery,
    #[serde(rename = "GORM N+1 Query with Related()")]
    RelatedInLoop,
    #[serde(rename = "Potential Missing Database Index")]
    MissingIndex,
    #[serde(rename = "Large Dataset Response Without Pagination")]
    UnpaginatedPayload,
    #[serde(rename = "Expensive Operation Without Caching")]
    MissingCache,
    #[serde(rename = "In-memory data storage")]
    InMemoryStorage,
    #[serde(rename = "No database connection pooling")]
    NoConnectionPooling,
}

impl PerformanceIssue {
    pub fn name(self) -> &'static str {
        match self {
            PerformanceIssue::CountedLoopQuery => "Potential N+1 Query Pattern",
            PerformanceIssue::RangeLoopQuery => "N+1 Query in Range Loop",
            PerformanceIssue::RelatedInLoop => "GORM N+1 Query with Related()",
            PerformanceIssue::MissingIndex => "Potential Missing Database Index",
            PerformanceIssue::UnpaginatedPayload => "Large Dataset Response Without Pagination",
            PerformanceIssue::MissingCache => "Expensive Operation Without Caching",
            PerformanceIssue::InMemoryStorage => "In-memory data storage",
            PerformanceIssue::NoConnectionPooling => "No database connection pooling",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            PerformanceIssue::CountedLoopQuery
            | PerformanceIssue::RangeLoopQuery
            | PerformanceIssue::RelatedInLoop => Severity::Critical,
            PerformanceIssue::MissingIndex
            | PerformanceIssue::UnpaginatedPayload
            | PerformanceIssue::NoConnectionPooling => Severity::High,
            PerformanceIssue::MissingCache | PerformanceIssue::InMemoryStorage => {
                Severity::Medium
            }
        }
    }

    pub fn impact(self) -> &'static str {
        match self {
            PerformanceIssue::CountedLoopQuery => {
                "CRITICAL: Could execute hundreds of database queries instead of one"
            }
            PerformanceIssue::RangeLoopQuery => {
                "CRITICAL: Database call inside range loop creates N+1 queries"
            }
            PerformanceIssue::RelatedInLoop => {
                "CRITICAL: Each Related() call executes a separate query"
            }
            PerformanceIssue::MissingIndex => {
                "HIGH: Query will scan entire table without proper index"
            }
            PerformanceIssue::UnpaginatedPayload => {
                "HIGH: Returning large datasets will cause slow responses and high memory usage"
            }
            PerformanceIssue::MissingCache => {
                "MEDIUM: Repeated expensive calculations will slow down your API"
            }
            PerformanceIssue::InMemoryStorage => {
                "MEDIUM: Data lost on restart, not scalable, memory leaks"
            }
            PerformanceIssue::NoConnectionPooling => "HIGH: Resource exhaustion, poor scalability",
        }
    }

    pub fn solution(self) -> &'static str {
        match self {
            PerformanceIssue::CountedLoopQuery => {
                "Use JOIN queries or eager loading to fetch related data in one query"
            }
            PerformanceIssue::RangeLoopQuery => {
                "Extract database calls outside the loop or use batch queries"
            }
            PerformanceIssue::RelatedInLoop => "Use Preload() to fetch related data efficiently",
            PerformanceIssue::MissingIndex => "Add database index on frequently queried columns",
            PerformanceIssue::UnpaginatedPayload => {
                "Implement pagination for large data responses"
            }
            PerformanceIssue::MissingCache => {
                "Cache expensive operation results with Redis or in-memory cache"
            }
            PerformanceIssue::InMemoryStorage => {
                "Implement database persistence (PostgreSQL, MongoDB, etc.)"
            }
            PerformanceIssue::NoConnectionPooling => "Configure connection pool settings",
        }
    }

    pub fn code_example(self) -> &'static str {
        match self {
            PerformanceIssue::CountedLoopQuery => {
                "// Bad: N+1 queries\n\
                 for i := 0; i < len(users); i++ {\n    \
                 db.Where(\"user_id = ?\", users[i].ID).Find(&posts)\n\
                 }\n\n\
                 // Good: single query with eager loading\n\
                 db.Preload(\"Posts\").Find(&users)"
            }
            PerformanceIssue::RangeLoopQuery | PerformanceIssue::RelatedInLoop => {
                "// Bad: query per element\n\
                 for _, order := range orders {\n    \
                 db.Model(&order).Related(&order.Items)\n\
                 }\n\n\
                 // Good: preload related data\n\
                 db.Preload(\"Items\").Find(&orders)"
            }
            PerformanceIssue::MissingIndex => {
                "-- Add indexes to your migration:\n\
                 CREATE INDEX idx_users_email ON users(email);\n\
                 CREATE INDEX idx_posts_status ON posts(status);\n\n\
                 // For GORM, tag the field:\n\
                 type User struct {\n    \
                 Email string `gorm:\"index\"`\n\
                 }"
            }
            PerformanceIssue::UnpaginatedPayload => {
                "page, _ := strconv.Atoi(c.DefaultQuery(\"page\", \"1\"))\n\
                 limit, _ := strconv.Atoi(c.DefaultQuery(\"limit\", \"20\"))\n\
                 offset := (page - 1) * limit\n\n\
                 var users []User\n\
                 db.Offset(offset).Limit(limit).Find(&users)\n\
                 c.JSON(200, gin.H{\"data\": users, \"page\": page})"
            }
            PerformanceIssue::MissingCache => {
                "if cached, ok := cache.Get(cacheKey); ok {\n    \
                 c.JSON(200, cached)\n    \
                 return\n\
                 }\n\
                 result := calculateExpensiveReport()\n\
                 cache.Set(cacheKey, result, 5*time.Minute)"
            }
            PerformanceIssue::InMemoryStorage => {
                "db, err := sql.Open(\"postgres\", connectionString)\n\
                 // Store records in a database table"
            }
            PerformanceIssue::NoConnectionPooling => {
                "db.SetMaxOpenConns(25)\n\
                 db.SetMaxIdleConns(25)\n\
                 db.SetConnMaxLifetime(5 * time.Minute)"
            }
        }
    }
}

impl fmt::Display for PerformanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Best-practice advisory categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryCategory {
    #[serde(rename = "Error Handling")]
    ErrorHandling,
    #[serde(rename = "Request Validation")]
    RequestValidation,
    #[serde(rename = "Logging")]
    Logging,
    #[serde(rename = "Configuration")]
    Configuration,
}

impl AdvisoryCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AdvisoryCategory::ErrorHandling => "Error Handling",
            AdvisoryCategory::RequestValidation => "Request Validation",
            AdvisoryCategory::Logging => "Logging",
            AdvisoryCategory::Configuration => "Configuration",
        }
    }
}

/// Heuristic recommendation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Architecture,
    Middleware,
    ApiDesign,
    Testing,
}

impl RecommendationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationCategory::Architecture => "architecture",
            RecommendationCategory::Middleware => "middleware",
            RecommendationCategory::ApiDesign => "api_design",
            RecommendationCategory::Testing => "testing",
        }
    }

    /// Fixed per category, not derived from evidence strength.
    pub fn confidence(self) -> f64 {
        match self {
            RecommendationCategory::Architecture => 0.85,
            RecommendationCategory::Middleware => 0.92,
            RecommendationCategory::ApiDesign => 0.78,
            RecommendationCategory::Testing => 0.88,
        }
    }
}

/// Selector names treated as ORM / database client calls.
pub const DATA_ACCESS_METHODS: &[&str] = &[
    "Find",
    "First",
    "Last",
    "Take",
    "Where",
    "Select",
    "Order",
    "Limit",
    "Offset",
    "Create",
    "Save",
    "Update",
    "UpdateColumn",
    "UpdateColumns",
    "Updates",
    "Delete",
    "Unscoped",
    "Raw",
    "Exec",
    "ExecContext",
    "Scan",
    "Rows",
    "Row",
    "Count",
    "Group",
    "Having",
    "Joins",
    "Preload",
    "Related",
    "Association",
    "Query",
    "QueryContext",
    "QueryRow",
    "QueryRowContext",
];

/// Markers of a file that serves HTTP.
pub const HTTP_SURFACE_MARKERS: &[&str] = &[
    "gin.",
    "echo.",
    "fiber.",
    "http.",
    "mux.",
    "chi.",
    "router.",
    "HandleFunc",
    "ListenAndServe",
];

pub const CORS_MARKERS: &[&str] = &["cors", "CORS"];

pub const JSON_BINDING_CALLS: &[&str] = &["BindJSON", "ShouldBind"];

pub const BAD_REQUEST_MARKERS: &[&str] = &["StatusBadRequest", "ErrBadRequest"];

pub const SECRET_KEYWORDS: &[&str] = &["password", "secret", "token"];

pub const DML_KEYWORDS: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE"];

pub const PARAMETERIZED_MARKERS: &[&str] = &["Prepare", "?"];

pub const RELATED_FETCH_CALL: &str = ".Related(";

pub const UNINDEXED_FILTER_PATTERNS: &[&str] = &[
    "WHERE name",
    "WHERE email",
    "WHERE status",
    "WHERE created_at",
    "LIKE '%",
    ".Where(\"name",
    ".Where(\"email",
    ".Where(\"status",
];

pub const SERIALIZE_CALLS: &[&str] = &["c.JSON", "json.Marshal"];

pub const BULK_FETCH_CALLS: &[&str] = &[".Find(&", "SELECT *"];

pub const LIMIT_MARKERS: &[&str] = &["Limit", "LIMIT"];

pub const EXPENSIVE_OPERATIONS: &[&str] = &[
    "calculateReport",
    "generateStats",
    "getAggregated",
    "COUNT(",
    "SUM(",
    "AVG(",
    "GROUP BY",
    "ORDER BY",
];

pub const CACHE_MARKERS: &[&str] = &["cache", "Cache"];

pub const DB_OPEN_CALLS: &[&str] = &["sql.Open", "sqlx.Open"];

pub const POOL_CONFIG_MARKER: &str = "SetMaxOpenConns";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_totally_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(" medium ".parse::<Severity>().unwrap(), Severity::Medium);
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn severity_weights_match_scoring_table() {
        assert_eq!(Severity::Critical.weight(), 25);
        assert_eq!(Severity::High.weight(), 15);
        assert_eq!(Severity::Medium.weight(), 10);
        assert_eq!(Severity::Low.weight(), 5);
    }

    #[test]
    fn performance_issue_serializes_by_name() {
        let json = serde_json::to_string(&PerformanceIssue::RangeLoopQuery).unwrap();
        assert_eq!(json, "\"N+1 Query in Range Loop\"");
        assert_eq!(
            PerformanceIssue::RangeLoopQuery.to_string(),
            "N+1 Query in Range Loop"
        );
    }

    #[test]
    fn security_category_serializes_snake_case() {
        let json = serde_json::to_string(&SecurityCategory::SqlInjectionRisk).unwrap();
        assert_eq!(json, "\"sql_injection_risk\"");
    }

    #[test]
    fn recommendation_confidence_is_a_probability() {
        for c in [
            RecommendationCategory::Architecture,
            RecommendationCategory::Middleware,
            RecommendationCategory::ApiDesign,
            RecommendationCategory::Testing,
        ] {
            let p = c.confidence();
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
