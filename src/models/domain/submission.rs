use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The durable record of one completed quiz attempt.
///
/// `session_token` carries a unique index and acts as the idempotency key:
/// at most one submission can ever exist per token. `unique_id` is the only
/// identifier exposed to end users (result URLs). Scores are snapshotted
/// here at submission time and never recomputed from the live catalog.
/// Answers are embedded in the same document so the whole submission lands
/// in a single atomic write.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Submission {
    pub unique_id: String,
    pub session_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub total_score: i32,
    pub max_score: i32,
    pub answers: Vec<SubmissionAnswer>,
    pub created_at: DateTime<Utc>,
}

/// Audit trail of exactly which choice produced each stored point value,
/// decoupled from any future edits to the question catalog.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionAnswer {
    pub question_id: String,
    pub choice_id: String,
    pub points_earned: i32,
}

pub struct SubmissionIdentity {
    pub user_id: Option<String>,
    pub user_name: String,
    pub user_email: Option<String>,
}

impl SubmissionIdentity {
    /// Identity used when neither a bearer token nor an identity block
    /// accompanied the submission.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            user_name: "Guest".to_string(),
            user_email: None,
        }
    }
}

impl Submission {
    pub fn new(
        session_token: &str,
        identity: SubmissionIdentity,
        total_score: i32,
        max_score: i32,
        answers: Vec<SubmissionAnswer>,
    ) -> Self {
        Self {
            unique_id: Uuid::new_v4().to_string(),
            session_token: session_token.to_string(),
            user_id: identity.user_id,
            user_name: identity.user_name,
            user_email: identity.user_email,
            total_score,
            max_score,
            answers,
            created_at: Utc::now(),
        }
    }
}
