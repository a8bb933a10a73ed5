use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::domain::career::CAREER_CATEGORIES,
    models::dto::{request::CareerScoreRequest, response::CareerScoreResponse},
    repositories::CareerQuestionRepository,
    services::scoring::ScoringService,
};

pub struct CareerService {
    questions: Arc<dyn CareerQuestionRepository>,
}

impl CareerService {
    pub fn new(questions: Arc<dyn CareerQuestionRepository>) -> Self {
        Self { questions }
    }

    /// Score a completed career answer set and rank the interest
    /// categories. Stateless: the ranking is deterministic from the answer
    /// set and the catalog snapshot, so there is nothing durable to store.
    pub async fn score(&self, request: CareerScoreRequest) -> AppResult<CareerScoreResponse> {
        request.validate()?;

        let catalog = self.questions.list_active().await?;
        let rankings =
            ScoringService::rank_categories(CAREER_CATEGORIES, &catalog, &request.answers)?;

        Ok(CareerScoreResponse {
            rankings: rankings.into_iter().map(Into::into).collect(),
        })
    }
}
