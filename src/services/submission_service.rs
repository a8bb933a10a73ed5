use std::sync::Arc;

use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::submission::{Submission, SubmissionIdentity},
    models::dto::request::{IdentityInput, ReplayPendingRequest, SubmitQuizRequest},
    repositories::{QuestionRepository, SubmissionRepository},
    services::scoring::ScoringService,
};

/// The resolved result of a submission attempt. Both variants are success:
/// `already_submitted` marks the read-and-recover path, where an earlier
/// attempt with the same session token won the insert.
pub struct SubmissionOutcome {
    pub unique_id: String,
    pub already_submitted: bool,
}

pub struct SubmissionService {
    questions: Arc<dyn QuestionRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    pending_ttl: Duration,
}

impl SubmissionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        pending_ttl_hours: i64,
    ) -> Self {
        Self {
            questions,
            submissions,
            pending_ttl: Duration::hours(pending_ttl_hours),
        }
    }

    /// Convert a completed attempt into exactly one durable submission.
    ///
    /// The store's unique constraint on `session_token` decides write-write
    /// races: exactly one insert per token can win. Losing the race is not
    /// a failure — the winning row is read back and its `unique_id`
    /// reported, so retrying with the same token always converges on the
    /// same externally visible identifier.
    pub async fn submit(
        &self,
        request: SubmitQuizRequest,
        bearer: Option<Claims>,
    ) -> AppResult<SubmissionOutcome> {
        request.validate()?;

        let catalog = self.questions.list_active().await?;
        if catalog.is_empty() {
            return Err(AppError::InternalError(
                "no active questions to grade against".to_string(),
            ));
        }

        let graded = ScoringService::grade(&catalog, &request.answers)?;
        let identity = Self::resolve_identity(bearer, request.identity);

        let submission = Submission::new(
            &request.session_token,
            identity,
            graded.total_score,
            graded.max_score,
            graded.answers,
        );

        match self.submissions.insert(submission).await {
            Ok(created) => {
                log::info!(
                    "stored submission {} for session token {}",
                    created.unique_id,
                    created.session_token
                );
                Ok(SubmissionOutcome {
                    unique_id: created.unique_id,
                    already_submitted: false,
                })
            }
            Err(AppError::AlreadyExists(_)) => {
                let existing = self
                    .submissions
                    .find_by_session_token(&request.session_token)
                    .await?
                    .ok_or_else(|| {
                        AppError::DatabaseError(format!(
                            "session token '{}' conflicted but no submission was found",
                            request.session_token
                        ))
                    })?;
                log::info!(
                    "recovered existing submission {} for session token {}",
                    existing.unique_id,
                    existing.session_token
                );
                Ok(SubmissionOutcome {
                    unique_id: existing.unique_id,
                    already_submitted: true,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// The deferred-auth bridge: replay a pending envelope persisted while
    /// the user was anonymous. The envelope is checked first and fails
    /// closed on any version, shape, or staleness problem; a valid one goes
    /// through the exact submission path above, so replaying twice resolves
    /// to the same `unique_id` instead of a second submission.
    pub async fn replay_pending(
        &self,
        request: ReplayPendingRequest,
        bearer: Option<Claims>,
    ) -> AppResult<SubmissionOutcome> {
        request.validate()?;
        request
            .pending
            .validate_replayable(self.pending_ttl, Utc::now())?;

        let submit_request = SubmitQuizRequest {
            session_token: request.pending.session_token,
            answers: request.pending.answers,
            identity: request.identity,
        };

        self.submit(submit_request, bearer).await
    }

    /// Bearer-token identity wins over a request identity block; with
    /// neither, the submission is recorded as a guest.
    fn resolve_identity(
        bearer: Option<Claims>,
        block: Option<IdentityInput>,
    ) -> SubmissionIdentity {
        if let Some(claims) = bearer {
            return SubmissionIdentity {
                user_id: Some(claims.sub),
                user_name: claims.name,
                user_email: claims.email,
            };
        }

        if let Some(identity) = block {
            return SubmissionIdentity {
                user_id: identity.user_id,
                user_name: identity.name,
                user_email: identity.email,
            };
        }

        SubmissionIdentity::anonymous()
    }
}
