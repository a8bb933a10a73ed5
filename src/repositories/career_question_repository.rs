use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::CareerQuestion};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareerQuestionRepository: Send + Sync {
    async fn list_active(&self) -> AppResult<Vec<CareerQuestion>>;
}

pub struct MongoCareerQuestionRepository {
    collection: Collection<CareerQuestion>,
}

impl MongoCareerQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("career_questions");
        Self { collection }
    }
}

#[async_trait]
impl CareerQuestionRepository for MongoCareerQuestionRepository {
    async fn list_active(&self) -> AppResult<Vec<CareerQuestion>> {
        let questions = self
            .collection
            .find(doc! { "is_active": true })
            .sort(doc! { "order": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }
}
