use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use compass_server::{
    attempt::pending::PendingAttempt,
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::career::{CareerChoice, CareerQuestion},
    models::domain::{Choice, Question, Submission},
    models::dto::request::{
        AnswerInput, CareerScoreRequest, IdentityInput, ReplayPendingRequest, SubmitQuizRequest,
    },
    repositories::{CareerQuestionRepository, QuestionRepository, SubmissionRepository},
    services::{CareerService, ResultsService, SubmissionService},
};

struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions),
        }
    }

    async fn replace(&self, questions: Vec<Question>) {
        *self.questions.write().await = questions;
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn list_active(&self) -> AppResult<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.is_active)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order);
        Ok(questions)
    }
}

struct InMemoryCareerQuestionRepository {
    questions: Vec<CareerQuestion>,
}

#[async_trait]
impl CareerQuestionRepository for InMemoryCareerQuestionRepository {
    async fn list_active(&self) -> AppResult<Vec<CareerQuestion>> {
        let mut questions: Vec<CareerQuestion> = self
            .questions
            .iter()
            .filter(|q| q.is_active)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order);
        Ok(questions)
    }
}

/// Keyed by session token, mirroring the unique index the Mongo backend
/// relies on: exactly one insert per token can ever win.
struct InMemorySubmissionRepository {
    submissions: RwLock<HashMap<String, Submission>>,
}

impl InMemorySubmissionRepository {
    fn new() -> Self {
        Self {
            submissions: RwLock::new(HashMap::new()),
        }
    }

    async fn count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: Submission) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;

        if submissions.contains_key(&submission.session_token) {
            return Err(AppError::AlreadyExists(format!(
                "submission for session token '{}' already exists",
                submission.session_token
            )));
        }

        submissions.insert(submission.session_token.clone(), submission.clone());
        Ok(submission)
    }

    async fn find_by_session_token(&self, session_token: &str) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.get(session_token).cloned())
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .find(|s| s.unique_id == unique_id)
            .cloned())
    }
}

fn question(id: &str, order: i16, points: &[i32]) -> Question {
    Question {
        id: id.to_string(),
        text: format!("question {}", id),
        explanation: None,
        order,
        is_active: true,
        choices: points
            .iter()
            .enumerate()
            .map(|(i, p)| Choice {
                id: format!("{}-c{}", id, i + 1),
                text: format!("choice {}", i + 1),
                points: *p,
                order: (i + 1) as i16,
            })
            .collect(),
    }
}

/// Three active questions with best choices worth 2, 3 and 5.
fn catalog() -> Vec<Question> {
    vec![
        question("q-1", 1, &[0, 1, 2]),
        question("q-2", 2, &[1, 3]),
        question("q-3", 3, &[0, 2, 5]),
    ]
}

/// Answers earning 2 + 1 + 5 = 8 against `catalog()`.
fn answers_earning_eight() -> Vec<AnswerInput> {
    vec![
        answer("q-1", "q-1-c3"),
        answer("q-2", "q-2-c1"),
        answer("q-3", "q-3-c3"),
    ]
}

fn answer(question_id: &str, choice_id: &str) -> AnswerInput {
    AnswerInput {
        question_id: question_id.to_string(),
        choice_id: choice_id.to_string(),
    }
}

fn submit_request(session_token: &str, answers: Vec<AnswerInput>) -> SubmitQuizRequest {
    SubmitQuizRequest {
        session_token: session_token.to_string(),
        answers,
        identity: Some(IdentityInput {
            user_id: Some("user-1".to_string()),
            name: "Jordan Lee".to_string(),
            email: Some("jordan@example.com".to_string()),
        }),
    }
}

struct Engine {
    questions: Arc<InMemoryQuestionRepository>,
    submissions: Arc<InMemorySubmissionRepository>,
    submission_service: SubmissionService,
    results_service: ResultsService,
}

fn engine() -> Engine {
    let questions = Arc::new(InMemoryQuestionRepository::new(catalog()));
    let submissions = Arc::new(InMemorySubmissionRepository::new());

    let submission_service =
        SubmissionService::new(questions.clone(), submissions.clone(), 72);
    let results_service = ResultsService::new(submissions.clone());

    Engine {
        questions,
        submissions,
        submission_service,
        results_service,
    }
}

const TOKEN: &str = "11111111-2222-3333-4444-555555555555";

#[tokio::test]
async fn submitting_twice_with_one_token_converges_on_one_submission() {
    let engine = engine();

    let first = engine
        .submission_service
        .submit(submit_request(TOKEN, answers_earning_eight()), None)
        .await
        .expect("first submit should succeed");
    assert!(!first.already_submitted);

    // A retried request after a dropped response carries the same token
    // and a freshly generated local id; the stored id must win.
    let second = engine
        .submission_service
        .submit(submit_request(TOKEN, answers_earning_eight()), None)
        .await
        .expect("retried submit should succeed");

    assert!(second.already_submitted);
    assert_eq!(second.unique_id, first.unique_id);
    assert_eq!(engine.submissions.count().await, 1);
}

#[tokio::test]
async fn distinct_tokens_create_distinct_submissions() {
    let engine = engine();

    let first = engine
        .submission_service
        .submit(submit_request(TOKEN, answers_earning_eight()), None)
        .await
        .expect("first submit should succeed");
    let second = engine
        .submission_service
        .submit(
            submit_request("99999999-8888-7777-6666-555555555555", answers_earning_eight()),
            None,
        )
        .await
        .expect("second submit should succeed");

    assert_ne!(first.unique_id, second.unique_id);
    assert_eq!(engine.submissions.count().await, 2);
}

#[tokio::test]
async fn stored_total_is_the_sum_of_the_answer_audit_trail() {
    let engine = engine();

    engine
        .submission_service
        .submit(submit_request(TOKEN, answers_earning_eight()), None)
        .await
        .expect("submit should succeed");

    let stored = engine
        .submissions
        .find_by_session_token(TOKEN)
        .await
        .expect("lookup should work")
        .expect("submission should exist");

    let audit_sum: i32 = stored.answers.iter().map(|a| a.points_earned).sum();
    assert_eq!(stored.total_score, audit_sum);
    assert!(stored.total_score >= 0);
    assert!(stored.total_score <= stored.max_score);
    assert_eq!(stored.answers.len(), catalog().len());
}

#[tokio::test]
async fn example_attempt_scores_eight_of_ten_in_the_ready_tier() {
    let engine = engine();

    let outcome = engine
        .submission_service
        .submit(submit_request(TOKEN, answers_earning_eight()), None)
        .await
        .expect("submit should succeed");

    let results = engine
        .results_service
        .get_results(&outcome.unique_id)
        .await
        .expect("results should resolve");

    assert_eq!(results.user_name, "Jordan Lee");
    assert_eq!(results.total_score, 8);
    assert_eq!(results.max_score, 10);
    assert_eq!(results.percentage, 80);
    assert_eq!(results.tier_label, "Ready");
}

#[tokio::test]
async fn stored_results_survive_later_catalog_edits() {
    let engine = engine();

    let outcome = engine
        .submission_service
        .submit(submit_request(TOKEN, answers_earning_eight()), None)
        .await
        .expect("submit should succeed");

    // The content team rewrites the quiz: the last question is now worth
    // 50 points and the first is retired entirely.
    engine
        .questions
        .replace(vec![
            question("q-2", 2, &[1, 3]),
            question("q-3", 3, &[0, 2, 50]),
        ])
        .await;

    let results = engine
        .results_service
        .get_results(&outcome.unique_id)
        .await
        .expect("results should resolve");

    // Snapshot property: the stored max score, not the live catalog,
    // drives the displayed percentage.
    assert_eq!(results.max_score, 10);
    assert_eq!(results.percentage, 80);
}

#[tokio::test]
async fn unknown_unique_id_reports_not_found() {
    let engine = engine();

    let result = engine.results_service.get_results("no-such-id").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn incomplete_answer_set_never_reaches_the_store() {
    let engine = engine();

    let result = engine
        .submission_service
        .submit(submit_request(TOKEN, vec![answer("q-1", "q-1-c1")]), None)
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(engine.submissions.count().await, 0);
}

#[tokio::test]
async fn anonymous_completion_replays_once_after_authentication() {
    let engine = engine();

    // The user finished the quiz signed out; the client persisted this
    // envelope and sent them to authenticate.
    let pending = PendingAttempt::new(TOKEN, answers_earning_eight());
    let claims = Claims::new("user-7", "Alex Kim", Some("alex@example.com"), 1);

    let first = engine
        .submission_service
        .replay_pending(
            ReplayPendingRequest {
                pending: pending.clone(),
                identity: None,
            },
            Some(claims.clone()),
        )
        .await
        .expect("replay should succeed");
    assert!(!first.already_submitted);

    // The stale envelope was never cleared and replays a second time:
    // same unique id, still one submission.
    let second = engine
        .submission_service
        .replay_pending(
            ReplayPendingRequest {
                pending,
                identity: None,
            },
            Some(claims),
        )
        .await
        .expect("second replay should resolve, not duplicate");

    assert!(second.already_submitted);
    assert_eq!(second.unique_id, first.unique_id);
    assert_eq!(engine.submissions.count().await, 1);

    // The replayed submission carries the authenticated identity even
    // though the answers were gathered anonymously.
    let stored = engine
        .submissions
        .find_by_session_token(TOKEN)
        .await
        .expect("lookup should work")
        .expect("submission should exist");
    assert_eq!(stored.user_id.as_deref(), Some("user-7"));
    assert_eq!(stored.user_name, "Alex Kim");
}

#[tokio::test]
async fn stale_pending_envelope_is_rejected_without_submitting() {
    let engine = engine();

    let mut pending = PendingAttempt::new(TOKEN, answers_earning_eight());
    pending.saved_at = Utc::now() - Duration::hours(100);

    let result = engine
        .submission_service
        .replay_pending(
            ReplayPendingRequest {
                pending,
                identity: None,
            },
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(engine.submissions.count().await, 0);
}

fn career_choice(id: &str, weights: &[(&str, i32)]) -> CareerChoice {
    CareerChoice {
        id: id.to_string(),
        text: format!("choice {}", id),
        order: 1,
        weights: weights.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    }
}

#[tokio::test]
async fn career_ranking_places_the_stronger_normalized_affinity_first() {
    // Per-question ceilings: realistic {3,2} (max 5), social {0,3} (max 3).
    let questions = vec![
        CareerQuestion {
            id: "cq-1".to_string(),
            text: "Which weekend project sounds best?".to_string(),
            order: 1,
            is_active: true,
            choices: vec![
                career_choice("cq-1-c1", &[("realistic", 3)]),
                career_choice("cq-1-c2", &[("realistic", 1), ("artistic", 1)]),
            ],
        },
        CareerQuestion {
            id: "cq-2".to_string(),
            text: "Pick the class you'd sign up for first.".to_string(),
            order: 2,
            is_active: true,
            choices: vec![
                career_choice("cq-2-c1", &[("realistic", 2), ("social", 1)]),
                career_choice("cq-2-c2", &[("social", 3)]),
            ],
        },
    ];

    let service = CareerService::new(Arc::new(InMemoryCareerQuestionRepository { questions }));

    let response = service
        .score(CareerScoreRequest {
            answers: vec![answer("cq-1", "cq-1-c1"), answer("cq-2", "cq-2-c2")],
        })
        .await
        .expect("career scoring should succeed");

    // Both categories earned 3 raw points, but social's max is 3 against
    // realistic's 5, so social (100%) outranks realistic (60%).
    assert_eq!(response.rankings[0].key, "social");
    assert_eq!(response.rankings[0].percentage, 100);
    assert_eq!(response.rankings[1].key, "realistic");
    assert_eq!(response.rankings[1].percentage, 60);
}
