/// In-memory repository backends and shared fixtures for unit and handler
/// tests. Nothing in here touches MongoDB.
pub mod memory {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::errors::{AppError, AppResult};
    use crate::models::domain::{CareerQuestion, Question, Submission};
    use crate::repositories::{
        CareerQuestionRepository, QuestionRepository, SubmissionRepository,
    };

    pub struct InMemoryQuestionRepository {
        questions: RwLock<Vec<Question>>,
    }

    impl InMemoryQuestionRepository {
        pub fn new(questions: Vec<Question>) -> Self {
            Self {
                questions: RwLock::new(questions),
            }
        }

        /// Replace the catalog, simulating a content edit after submissions
        /// were stored.
        pub async fn replace(&self, questions: Vec<Question>) {
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

    pub struct InMemoryCareerQuestionRepository {
        questions: Vec<CareerQuestion>,
    }

    impl InMemoryCareerQuestionRepository {
        pub fn new(questions: Vec<CareerQuestion>) -> Self {
            Self { questions }
        }
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

    /// Keyed by session token: the same atomic insert-or-conflict behavior
    /// the Mongo unique index provides.
    pub struct InMemorySubmissionRepository {
        submissions: RwLock<HashMap<String, Submission>>,
    }

    impl InMemorySubmissionRepository {
        pub fn new() -> Self {
            Self {
                submissions: RwLock::new(HashMap::new()),
            }
        }

        pub async fn count(&self) -> usize {
            self.submissions.read().await.len()
        }
    }

    impl Default for InMemorySubmissionRepository {
        fn default() -> Self {
            Self::new()
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

            if submissions
                .values()
                .any(|s| s.unique_id == submission.unique_id)
            {
                return Err(AppError::DatabaseError(format!(
                    "unique id '{}' already exists",
                    submission.unique_id
                )));
            }

            submissions.insert(submission.session_token.clone(), submission.clone());
            Ok(submission)
        }

        async fn find_by_session_token(
            &self,
            session_token: &str,
        ) -> AppResult<Option<Submission>> {
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
}

pub mod fixtures {
    use std::sync::Arc;

    use chrono::Utc;

    use crate::app_state::AppState;
    use crate::config::Config;
    use crate::models::domain::career::{CareerChoice, CareerQuestion};
    use crate::models::domain::{Choice, Question, Submission};
    use crate::models::dto::request::AnswerInput;
    use crate::services::{CareerService, CatalogService, ResultsService, SubmissionService};
    use crate::test_utils::memory::{
        InMemoryCareerQuestionRepository, InMemoryQuestionRepository,
        InMemorySubmissionRepository,
    };

    pub fn question(id: &str, order: i16, points: &[i32]) -> Question {
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

    /// Three questions whose best choices are worth 2, 3 and 5 points, so
    /// the catalog max is 10.
    pub fn catalog() -> Vec<Question> {
        vec![
            question("q-1", 1, &[0, 1, 2]),
            question("q-2", 2, &[1, 3]),
            question("q-3", 3, &[0, 2, 5]),
        ]
    }

    /// A complete answer set earning 2 + 1 + 5 = 8 against `catalog()`.
    pub fn complete_answers() -> Vec<AnswerInput> {
        vec![
            AnswerInput {
                question_id: "q-1".to_string(),
                choice_id: "q-1-c3".to_string(),
            },
            AnswerInput {
                question_id: "q-2".to_string(),
                choice_id: "q-2-c1".to_string(),
            },
            AnswerInput {
                question_id: "q-3".to_string(),
                choice_id: "q-3-c3".to_string(),
            },
        ]
    }

    fn career_choice(id: &str, weights: &[(&str, i32)]) -> CareerChoice {
        CareerChoice {
            id: id.to_string(),
            text: format!("choice {}", id),
            order: 1,
            weights: weights.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    /// Two career questions with per-question ceilings {3,2} for
    /// "realistic" and {0,3} for "social", so the maxes are {5,3}.
    pub fn career_catalog() -> Vec<CareerQuestion> {
        vec![
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
        ]
    }

    pub fn submission_with(session_token: &str, unique_id: &str) -> Submission {
        Submission {
            unique_id: unique_id.to_string(),
            session_token: session_token.to_string(),
            user_id: None,
            user_name: "Guest".to_string(),
            user_email: None,
            total_score: 8,
            max_score: 10,
            answers: vec![],
            created_at: Utc::now(),
        }
    }

    /// A fully wired application state over in-memory repositories, seeded
    /// with the fixture catalogs and no submissions.
    pub fn app_state() -> AppState {
        let questions = Arc::new(InMemoryQuestionRepository::new(catalog()));
        let career_questions =
            Arc::new(InMemoryCareerQuestionRepository::new(career_catalog()));
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        let config = Arc::new(Config::test_config());

        AppState {
            catalog_service: Arc::new(CatalogService::new(
                questions.clone(),
                career_questions.clone(),
            )),
            submission_service: Arc::new(SubmissionService::new(
                questions,
                submissions.clone(),
                config.pending_attempt_ttl_hours,
            )),
            results_service: Arc::new(ResultsService::new(submissions)),
            career_service: Arc::new(CareerService::new(career_questions)),
            config,
        }
    }
}
