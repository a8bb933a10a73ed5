use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::attempt::pending::PendingAttempt;

/// One answered question: which choice the user picked. Point values are
/// resolved server-side from the catalog snapshot, never trusted from the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct AnswerInput {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,

    #[validate(length(min = 1, max = 64))]
    pub choice_id: String,
}

/// Optional identity accompanying a submission. `user_id` stays `None` for
/// anonymous-at-submission-time flows; the name is required whenever an
/// identity block is present at all.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdentityInput {
    pub user_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    /// The idempotency key: generated once when the attempt started and
    /// never regenerated, including across retries.
    #[validate(length(min = 8, max = 128))]
    pub session_token: String,

    #[validate(length(min = 1), nested)]
    pub answers: Vec<AnswerInput>,

    #[validate(nested)]
    pub identity: Option<IdentityInput>,
}

/// The deferred-auth replay: the pending envelope a client persisted while
/// anonymous, now re-presented after authentication. The envelope itself is
/// checked separately (version, TTL) so a stale or malformed payload fails
/// closed instead of half-submitting.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplayPendingRequest {
    pub pending: PendingAttempt,

    #[validate(nested)]
    pub identity: Option<IdentityInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CareerScoreRequest {
    #[validate(length(min = 1), nested)]
    pub answers: Vec<AnswerInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(question_id: &str, choice_id: &str) -> AnswerInput {
        AnswerInput {
            question_id: question_id.to_string(),
            choice_id: choice_id.to_string(),
        }
    }

    #[test]
    fn test_valid_submit_request() {
        let request = SubmitQuizRequest {
            session_token: "b71a2f80-3f5c-4f7e-9a39-1f6b1a2c3d4e".to_string(),
            answers: vec![answer("q-1", "c-1")],
            identity: Some(IdentityInput {
                user_id: Some("user-1".to_string()),
                name: "Jordan".to_string(),
                email: Some("jordan@example.com".to_string()),
            }),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_short_session_token_rejected() {
        let request = SubmitQuizRequest {
            session_token: "short".to_string(),
            answers: vec![answer("q-1", "c-1")],
            identity: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_answer_set_rejected() {
        let request = SubmitQuizRequest {
            session_token: "b71a2f80-3f5c-4f7e-9a39-1f6b1a2c3d4e".to_string(),
            answers: vec![],
            identity: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalid_identity_email_rejected() {
        let request = SubmitQuizRequest {
            session_token: "b71a2f80-3f5c-4f7e-9a39-1f6b1a2c3d4e".to_string(),
            answers: vec![answer("q-1", "c-1")],
            identity: Some(IdentityInput {
                user_id: None,
                name: "Jordan".to_string(),
                email: Some("not-an-email".to_string()),
            }),
        };
        assert!(request.validate().is_err());
    }
}
