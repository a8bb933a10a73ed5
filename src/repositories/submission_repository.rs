use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Submission,
};

const SESSION_TOKEN_INDEX: &str = "session_token_unique";
const UNIQUE_ID_INDEX: &str = "unique_id_unique";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert honoring the unique `session_token` constraint. A conflict on
    /// that key maps to `AlreadyExists`; callers recover by reading the
    /// winning row back by token. A backend other than MongoDB must supply
    /// an equivalent atomic insert-or-conflict primitive.
    async fn insert(&self, submission: Submission) -> AppResult<Submission>;

    async fn find_by_session_token(&self, session_token: &str)
        -> AppResult<Option<Submission>>;

    async fn find_by_unique_id(&self, unique_id: &str) -> AppResult<Option<Submission>>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("submissions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let session_token_index = IndexModel::builder()
            .keys(doc! { "session_token": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(SESSION_TOKEN_INDEX.to_string())
                    .build(),
            )
            .build();

        let unique_id_index = IndexModel::builder()
            .keys(doc! { "unique_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(UNIQUE_ID_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(session_token_index).await?;
        self.collection.create_index(unique_id_index).await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

/// True only for a duplicate-key write failure on the session-token index.
/// Any other constraint violation stays a database error; the recover path
/// in the submission protocol is reserved for the idempotency key.
fn is_session_token_conflict(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
            write_error,
        )) => write_error.code == 11000 && write_error.message.contains(SESSION_TOKEN_INDEX),
        _ => false,
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn insert(&self, submission: Submission) -> AppResult<Submission> {
        match self.collection.insert_one(&submission).await {
            Ok(_) => Ok(submission),
            Err(err) if is_session_token_conflict(&err) => Err(AppError::AlreadyExists(format!(
                "submission for session token '{}' already exists",
                submission.session_token
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_session_token(
        &self,
        session_token: &str,
    ) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one(doc! { "session_token": session_token })
            .await?;
        Ok(submission)
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one(doc! { "unique_id": unique_id })
            .await?;
        Ok(submission)
    }
}
