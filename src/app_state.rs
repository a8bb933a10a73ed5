use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoCareerQuestionRepository, MongoQuestionRepository, MongoSubmissionRepository,
    },
    services::{CareerService, CatalogService, ResultsService, SubmissionService},
};

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub submission_service: Arc<SubmissionService>,
    pub results_service: Arc<ResultsService>,
    pub career_service: Arc<CareerService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config, db: &Database) -> AppResult<Self> {
        let question_repository = Arc::new(MongoQuestionRepository::new(db));
        let career_question_repository = Arc::new(MongoCareerQuestionRepository::new(db));

        let submission_repository = Arc::new(MongoSubmissionRepository::new(db));
        submission_repository.ensure_indexes().await?;

        let catalog_service = Arc::new(CatalogService::new(
            question_repository.clone(),
            career_question_repository.clone(),
        ));
        let submission_service = Arc::new(SubmissionService::new(
            question_repository,
            submission_repository.clone(),
            config.pending_attempt_ttl_hours,
        ));
        let results_service = Arc::new(ResultsService::new(submission_repository));
        let career_service = Arc::new(CareerService::new(career_question_repository));

        Ok(Self {
            catalog_service,
            submission_service,
            results_service,
            career_service,
            config: Arc::new(config),
        })
    }
}
