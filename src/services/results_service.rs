use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::ResultTier,
    models::dto::response::QuizResultResponse,
    repositories::SubmissionRepository,
    services::scoring::ScoringService,
};

pub struct ResultsService {
    submissions: Arc<dyn SubmissionRepository>,
}

impl ResultsService {
    pub fn new(submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { submissions }
    }

    /// Resolve a public result id into display data. The percentage comes
    /// from the scores snapshotted at submission time — the live catalog is
    /// never consulted, so later question edits cannot rewrite history.
    pub async fn get_results(&self, unique_id: &str) -> AppResult<QuizResultResponse> {
        let submission = self
            .submissions
            .find_by_unique_id(unique_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("results '{}' not found", unique_id)))?;

        let percentage =
            ScoringService::percentage(submission.total_score, submission.max_score);
        let tier = ResultTier::for_percentage(percentage);

        Ok(QuizResultResponse {
            user_name: submission.user_name,
            total_score: submission.total_score,
            max_score: submission.max_score,
            percentage,
            tier,
            tier_label: tier.label(),
        })
    }
}
