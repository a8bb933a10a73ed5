use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{CareerQuestion, Question},
    repositories::{CareerQuestionRepository, QuestionRepository},
};

/// Read-only access to the question catalogs. The engine never writes
/// questions; the content collaborator owns them.
pub struct CatalogService {
    questions: Arc<dyn QuestionRepository>,
    career_questions: Arc<dyn CareerQuestionRepository>,
}

impl CatalogService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        career_questions: Arc<dyn CareerQuestionRepository>,
    ) -> Self {
        Self {
            questions,
            career_questions,
        }
    }

    pub async fn quiz_questions(&self) -> AppResult<Vec<Question>> {
        self.questions.list_active().await
    }

    pub async fn career_questions(&self) -> AppResult<Vec<CareerQuestion>> {
        self.career_questions.list_active().await
    }
}
