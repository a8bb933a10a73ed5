use std::collections::{HashMap, HashSet};

use crate::errors::{AppError, AppResult};
use crate::models::domain::career::{CareerCategory, CareerQuestion};
use crate::models::domain::{Question, SubmissionAnswer};
use crate::models::dto::request::AnswerInput;

/// The outcome of grading one completed answer set against the catalog
/// snapshot it was answered from. Both scores are stored on the submission
/// and never recomputed at read time.
pub struct GradedAttempt {
    pub total_score: i32,
    pub max_score: i32,
    pub answers: Vec<SubmissionAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryScore {
    pub key: String,
    pub name: String,
    pub score: i32,
    pub max_score: i32,
    pub percentage: i32,
}

/// Pure, deterministic scoring over an in-memory catalog snapshot. No I/O.
pub struct ScoringService;

impl ScoringService {
    /// Grade a completed answer set. Point values are resolved from the
    /// catalog, not taken from the client; an incomplete set, an unknown
    /// question or choice, or a duplicate answer is a validation error and
    /// never reaches the store.
    pub fn grade(questions: &[Question], answers: &[AnswerInput]) -> AppResult<GradedAttempt> {
        let question_map: HashMap<&str, &Question> =
            questions.iter().map(|q| (q.id.as_str(), q)).collect();

        if answers.len() < questions.len() {
            return Err(AppError::ValidationError(format!(
                "expected {} answers but got {}",
                questions.len(),
                answers.len()
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut total_score = 0;
        let mut graded = Vec::with_capacity(answers.len());

        for answer in answers {
            let question = question_map.get(answer.question_id.as_str()).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "question '{}' is not part of the active catalog",
                    answer.question_id
                ))
            })?;

            if !seen.insert(answer.question_id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "duplicate answer for question '{}'",
                    answer.question_id
                )));
            }

            let choice = question.choice(&answer.choice_id).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "unknown choice '{}' for question '{}'",
                    answer.choice_id, answer.question_id
                ))
            })?;

            total_score += choice.points;
            graded.push(SubmissionAnswer {
                question_id: question.id.clone(),
                choice_id: choice.id.clone(),
                points_earned: choice.points,
            });
        }

        Ok(GradedAttempt {
            total_score,
            max_score: Self::max_score(questions),
            answers: graded,
        })
    }

    /// Best-choice ceiling per question, summed over the snapshot.
    pub fn max_score(questions: &[Question]) -> i32 {
        questions.iter().map(|q| q.max_points()).sum()
    }

    /// Display percentage. A zero max scores 0%, never a division error.
    pub fn percentage(total: i32, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        ((100.0 * total as f64) / max as f64).round() as i32
    }

    /// Score a completed career answer set against every declared category
    /// and rank the categories best-first. The sort is stable, so equal
    /// percentages keep the declared category order.
    pub fn rank_categories(
        categories: &[CareerCategory],
        questions: &[CareerQuestion],
        answers: &[AnswerInput],
    ) -> AppResult<Vec<CategoryScore>> {
        let question_map: HashMap<&str, &CareerQuestion> =
            questions.iter().map(|q| (q.id.as_str(), q)).collect();

        if answers.len() < questions.len() {
            return Err(AppError::ValidationError(format!(
                "expected {} answers but got {}",
                questions.len(),
                answers.len()
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut totals: HashMap<&str, i32> = HashMap::new();

        for answer in answers {
            let question = question_map.get(answer.question_id.as_str()).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "question '{}' is not part of the active catalog",
                    answer.question_id
                ))
            })?;

            if !seen.insert(answer.question_id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "duplicate answer for question '{}'",
                    answer.question_id
                )));
            }

            let choice = question.choice(&answer.choice_id).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "unknown choice '{}' for question '{}'",
                    answer.choice_id, answer.question_id
                ))
            })?;

            for (key, points) in &choice.weights {
                *totals.entry(key.as_str()).or_insert(0) += points;
            }
        }

        let mut scores: Vec<CategoryScore> = categories
            .iter()
            .map(|category| {
                let max_score: i32 = questions.iter().map(|q| q.ceiling_for(category.key)).sum();
                let score = totals.get(category.key).copied().unwrap_or(0);
                CategoryScore {
                    key: category.key.to_string(),
                    name: category.name.to_string(),
                    score,
                    max_score,
                    percentage: Self::percentage(score, max_score),
                }
            })
            .collect();

        scores.sort_by(|a, b| b.percentage.cmp(&a.percentage));

        Ok(scores)
    }
}
