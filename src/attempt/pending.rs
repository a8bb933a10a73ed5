use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::dto::request::AnswerInput;

/// Well-known client-storage key for the anonymous-completion payload.
pub const PENDING_ATTEMPT_KEY: &str = "compass.pending_quiz";

/// Schema version of the stored envelope. Bump on any shape change; a
/// stored payload with a different version is rejected and cleared rather
/// than reinterpreted.
pub const PENDING_ATTEMPT_VERSION: u32 = 1;

/// The payload persisted client-side when an anonymous user finishes the
/// quiz: everything needed to replay the submission after authentication.
/// Validated on read — replaying never trusts the stored shape blindly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PendingAttempt {
    pub version: u32,
    pub session_token: String,
    pub answers: Vec<AnswerInput>,
    pub saved_at: DateTime<Utc>,
}

impl PendingAttempt {
    pub fn new(session_token: &str, answers: Vec<AnswerInput>) -> Self {
        Self {
            version: PENDING_ATTEMPT_VERSION,
            session_token: session_token.to_string(),
            answers,
            saved_at: Utc::now(),
        }
    }

    /// Checks that this envelope is safe to replay. Fails closed: any
    /// mismatch means the attempt is discarded and the quiz retaken, never
    /// partially submitted.
    pub fn validate_replayable(&self, ttl: Duration, now: DateTime<Utc>) -> AppResult<()> {
        if self.version != PENDING_ATTEMPT_VERSION {
            return Err(AppError::ValidationError(format!(
                "unsupported pending attempt version {}",
                self.version
            )));
        }

        if self.session_token.is_empty() {
            return Err(AppError::ValidationError(
                "pending attempt is missing its session token".to_string(),
            ));
        }

        if self.answers.is_empty() {
            return Err(AppError::ValidationError(
                "pending attempt has no answers".to_string(),
            ));
        }

        // A timestamp from the future means the payload was tampered with
        // or the clock is broken; either way it is not replayable.
        if self.saved_at > now {
            return Err(AppError::ValidationError(
                "pending attempt timestamp is in the future".to_string(),
            ));
        }

        if now - self.saved_at > ttl {
            return Err(AppError::ValidationError(
                "pending attempt is stale".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::InternalError(format!("failed to serialize pending attempt: {}", e)))
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::ValidationError(format!("malformed pending attempt payload: {}", e))
        })
    }
}
