use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A career-interest question. Same catalog shape as the readiness quiz,
/// except a choice contributes points to several interest categories at
/// once instead of a single score.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CareerQuestion {
    pub id: String,
    pub text: String,
    pub order: i16,
    pub is_active: bool,
    pub choices: Vec<CareerChoice>,
}

/// A career-quiz choice. `weights` is a partial map from category key to
/// points; categories a choice does not mention implicitly score 0.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CareerChoice {
    pub id: String,
    pub text: String,
    pub order: i16,
    pub weights: HashMap<String, i32>,
}

impl CareerQuestion {
    /// The most any single choice on this question can contribute to the
    /// given category. The per-category max score is the sum of these
    /// ceilings, not the sum over all choices.
    pub fn ceiling_for(&self, category_key: &str) -> i32 {
        self.choices
            .iter()
            .map(|c| c.weights.get(category_key).copied().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    pub fn choice(&self, choice_id: &str) -> Option<&CareerChoice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// One entry in the fixed interest-category table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CareerCategory {
    pub key: &'static str,
    pub name: &'static str,
}

/// The interest categories the career quiz scores against, in declared
/// order. Ranking ties break by this order.
pub const CAREER_CATEGORIES: &[CareerCategory] = &[
    CareerCategory { key: "realistic", name: "Realistic" },
    CareerCategory { key: "investigative", name: "Investigative" },
    CareerCategory { key: "artistic", name: "Artistic" },
    CareerCategory { key: "social", name: "Social" },
    CareerCategory { key: "enterprising", name: "Enterprising" },
    CareerCategory { key: "conventional", name: "Conventional" },
];
