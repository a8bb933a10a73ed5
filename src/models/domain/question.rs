use serde::{Deserialize, Serialize};

/// A single readiness-quiz question. Questions are owned by the content
/// collaborator; the engine only ever reads them. Inactive questions stay
/// in the store for historical audit but are excluded from display and
/// from max-score computation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub order: i16,
    pub is_active: bool,
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub points: i32,
    pub order: i16,
}

impl Question {
    /// The ceiling this question contributes to the attempt's max score.
    pub fn max_points(&self) -> i32 {
        self.choices.iter().map(|c| c.points).max().unwrap_or(0)
    }

    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}
