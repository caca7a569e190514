//! Heuristic recommendations for HTTP services.
//!
//! Confidence is a fixed property of each category, so identical input
//! always yields identical output.

use crate::report::model::RecommendationFinding;
use crate::rules::catalog::RecommendationCategory;
use crate::rules::text::exposes_http_surface;

struct RecommendationRule {
    category: RecommendationCategory,
    recommendation: &'static str,
    auto_fix_code: &'static str,
    applies: fn(text: &str, path: &str) -> bool,
}

static RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        category: RecommendationCategory::Architecture,
        recommendation: "Consider implementing repository pattern for cleaner data access",
        auto_fix_code: "type AlbumRepository interface {\n    \
                        GetAll(ctx context.Context) ([]Album, error)\n    \
                        GetByID(ctx context.Context, id string) (*Album, error)\n    \
                        Create(ctx context.Context, album Album) error\n    \
                        Update(ctx context.Context, album Album) error\n    \
                        Delete(ctx context.Context, id string) error\n\
                        }",
        applies: |text, _| text.contains("func get") && text.contains("func post"),
    },
    RecommendationRule {
        category: RecommendationCategory::Middleware,
        recommendation: "Add essential middleware for production readiness",
        auto_fix_code: "router.Use(gin.Logger())\n\
                        router.Use(gin.Recovery())\n\
                        router.Use(cors.Default())\n\
                        router.Use(rateLimitMiddleware())",
        applies: |text, _| !text.contains("Recovery()"),
    },
    RecommendationRule {
        category: RecommendationCategory::ApiDesign,
        recommendation: "Add API versioning for future compatibility",
        auto_fix_code: "v1 := router.Group(\"/api/v1\")\n\
                        {\n    \
                        v1.GET(\"/albums\", getAlbums)\n    \
                        v1.POST(\"/albums\", postAlbums)\n\
                        }",
        applies: |text, _| !text.contains("/v1/") && !text.contains("/api/v"),
    },
    RecommendationRule {
        category: RecommendationCategory::Testing,
        recommendation: "Add unit tests for better code reliability",
        auto_fix_code: "func TestGetAlbums(t *testing.T) {\n    \
                        router := setupRouter()\n    \
                        w := httptest.NewRecorder()\n    \
                        req, _ := http.NewRequest(\"GET\", \"/albums\", nil)\n    \
                        router.ServeHTTP(w, req)\n    \
                        assert.Equal(t, 200, w.Code)\n\
                        }",
        applies: |text, path| {
            !path.ends_with("_test.go") && !text.contains("_test.go") && !text.contains("testing.T")
        },
    },
];

pub fn generate_recommendations(text: &str, path: &str) -> Vec<RecommendationFinding> {
    if !exposes_http_surface(text) {
        return Vec::new();
    }

    RECOMMENDATION_RULES
        .iter()
        .filter(|rule| (rule.applies)(text, path))
        .map(|rule| RecommendationFinding {
            category: rule.category,
            confidence: rule.category.confidence(),
            recommendation: rule.recommendation.to_string(),
            auto_fix_code: Some(rule.auto_fix_code.to_string()),
        })
        .collect()
}
