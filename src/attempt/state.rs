use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::attempt::pending::PendingAttempt;
use crate::errors::{AppError, AppResult};
use crate::models::domain::Question;
use crate::models::dto::request::AnswerInput;

/// Progress thresholds (percent) at which a milestone event fires, once
/// per attempt.
pub const PROGRESS_MILESTONES: [u8; 3] = [25, 50, 75];

/// Durable client-side storage for the in-progress session token. The
/// token must survive page reloads so a refresh mid-quiz does not fork a
/// second idempotency key for the same logical attempt.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

#[derive(Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, token: &str) {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptPhase {
    Loading,
    InProgress { index: usize },
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub choice_id: String,
    pub points_earned: i32,
}

/// One user's in-progress pass through the question sequence. Lives in
/// client memory; only the session token (and, for anonymous completions,
/// the pending envelope) touches durable storage.
pub struct Attempt {
    session_token: Option<String>,
    questions: Vec<Question>,
    answers: HashMap<String, RecordedAnswer>,
    phase: AttemptPhase,
    fired_milestones: HashSet<u8>,
    started_at: Option<DateTime<Utc>>,
}

impl Default for Attempt {
    fn default() -> Self {
        Self::new()
    }
}

impl Attempt {
    pub fn new() -> Self {
        Self {
            session_token: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            phase: AttemptPhase::Loading,
            fired_milestones: HashSet::new(),
            started_at: None,
        }
    }

    /// The catalog arrived; enter the question sequence. An existing token
    /// is read back from durable storage rather than regenerated, so this
    /// is exactly-once per attempt, not once per page load. Returns any
    /// milestones crossed by entering the first question.
    pub fn begin(
        &mut self,
        mut questions: Vec<Question>,
        store: &dyn TokenStore,
    ) -> AppResult<Vec<u8>> {
        if self.phase != AttemptPhase::Loading {
            return Err(AppError::ValidationError(
                "attempt already started".to_string(),
            ));
        }

        questions.retain(|q| q.is_active);
        questions.sort_by_key(|q| q.order);

        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "question catalog is empty".to_string(),
            ));
        }

        let token = match store.load() {
            Some(existing) => existing,
            None => {
                let fresh = Uuid::new_v4().to_string();
                store.save(&fresh);
                fresh
            }
        };

        self.session_token = Some(token);
        self.questions = questions;
        self.started_at = Some(Utc::now());
        self.phase = AttemptPhase::InProgress { index: 0 };

        Ok(self.cross_milestones())
    }

    /// Record the choice for the current question and advance, completing
    /// the attempt on the last question. Re-answering after going back
    /// overwrites the earlier choice. Returns milestones crossed by this
    /// transition.
    pub fn select_answer(&mut self, choice_id: &str) -> AppResult<Vec<u8>> {
        let index = match self.phase {
            AttemptPhase::InProgress { index } => index,
            _ => {
                return Err(AppError::ValidationError(
                    "no question is awaiting an answer".to_string(),
                ))
            }
        };

        let question = &self.questions[index];
        let choice = question.choice(choice_id).ok_or_else(|| {
            AppError::ValidationError(format!(
                "unknown choice '{}' for question '{}'",
                choice_id, question.id
            ))
        })?;

        self.answers.insert(
            question.id.clone(),
            RecordedAnswer {
                choice_id: choice.id.clone(),
                points_earned: choice.points,
            },
        );

        self.phase = if index + 1 == self.questions.len() {
            AttemptPhase::Completed
        } else {
            AttemptPhase::InProgress { index: index + 1 }
        };

        Ok(self.cross_milestones())
    }

    /// Step back one question, clamped at the first. The answer recorded
    /// for that question is kept so its choice stays pre-selected.
    pub fn go_back(&mut self) {
        if let AttemptPhase::InProgress { index } = self.phase {
            self.phase = AttemptPhase::InProgress {
                index: index.saturating_sub(1),
            };
        }
    }

    pub fn phase(&self) -> &AttemptPhase {
        &self.phase
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            AttemptPhase::InProgress { index } => self.questions.get(index),
            _ => None,
        }
    }

    pub fn recorded_answer(&self, question_id: &str) -> Option<&RecordedAnswer> {
        self.answers.get(question_id)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == AttemptPhase::Completed
    }

    pub fn progress_percent(&self) -> u8 {
        match self.phase {
            AttemptPhase::Loading => 0,
            AttemptPhase::InProgress { index } => {
                (((index + 1) * 100) / self.questions.len()) as u8
            }
            AttemptPhase::Completed => 100,
        }
    }

    fn cross_milestones(&mut self) -> Vec<u8> {
        let progress = self.progress_percent();
        let mut fired = Vec::new();
        for threshold in PROGRESS_MILESTONES {
            if progress >= threshold && self.fired_milestones.insert(threshold) {
                fired.push(threshold);
            }
        }
        fired
    }

    /// The completed answer set in question order, ready for submission.
    pub fn answers_for_submission(&self) -> AppResult<Vec<AnswerInput>> {
        if !self.is_complete() {
            return Err(AppError::ValidationError(
                "attempt is not complete".to_string(),
            ));
        }

        let mut answers = Vec::with_capacity(self.questions.len());
        for question in &self.questions {
            let recorded = self.answers.get(&question.id).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "question '{}' has no recorded answer",
                    question.id
                ))
            })?;
            answers.push(AnswerInput {
                question_id: question.id.clone(),
                choice_id: recorded.choice_id.clone(),
            });
        }
        Ok(answers)
    }

    /// Snapshot for the deferred-auth bridge: persisted client-side when an
    /// anonymous user finishes, replayed after authentication.
    pub fn to_pending(&self) -> AppResult<PendingAttempt> {
        let token = self.session_token.clone().ok_or_else(|| {
            AppError::ValidationError("attempt has no session token".to_string())
        })?;
        Ok(PendingAttempt::new(&token, self.answers_for_submission()?))
    }

    /// Called once a submission is confirmed by either the insert or the
    /// recover path, so a later, unrelated attempt cannot collide with a
    /// stale token.
    pub fn clear_token(store: &dyn TokenStore) {
        store.clear();
    }
}
