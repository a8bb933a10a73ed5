use serde::Serialize;

use crate::models::domain::ResultTier;
use crate::services::scoring::CategoryScore;

/// Returned for both submission outcomes: a fresh insert and a recovery of
/// an earlier submission with the same session token. Both are success from
/// the caller's point of view; `already_submitted` tells them apart.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitQuizResponse {
    pub unique_id: String,
    pub already_submitted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResultResponse {
    pub user_name: String,
    pub total_score: i32,
    pub max_score: i32,
    pub percentage: i32,
    pub tier: ResultTier,
    pub tier_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScoreDto {
    pub key: String,
    pub name: String,
    pub score: i32,
    pub max_score: i32,
    pub percentage: i32,
}

impl From<CategoryScore> for CategoryScoreDto {
    fn from(score: CategoryScore) -> Self {
        CategoryScoreDto {
            key: score.key,
            name: score.name,
            score: score.score,
            max_score: score.max_score,
            percentage: score.percentage,
        }
    }
}

/// Categories ordered best-first; ties keep the declared category order.
#[derive(Debug, Clone, Serialize)]
pub struct CareerScoreResponse {
    pub rankings: Vec<CategoryScoreDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_score_dto_conversion() {
        let score = CategoryScore {
            key: "artistic".to_string(),
            name: "Artistic".to_string(),
            score: 3,
            max_score: 5,
            percentage: 60,
        };

        let dto: CategoryScoreDto = score.into();
        assert_eq!(dto.key, "artistic");
        assert_eq!(dto.percentage, 60);
    }

    #[test]
    fn test_result_response_serializes_tier_as_snake_case() {
        let response = QuizResultResponse {
            user_name: "Jordan".to_string(),
            total_score: 8,
            max_score: 10,
            percentage: 80,
            tier: ResultTier::Ready,
            tier_label: ResultTier::Ready.label(),
        };

        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["tier"], "ready");
        assert_eq!(json["tier_label"], "Ready");
    }
}
