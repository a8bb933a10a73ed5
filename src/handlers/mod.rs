pub mod career_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use career_handler::{get_career_questions, score_career};
pub use health_handler::{health_live, health_ready};
pub use quiz_handler::{get_questions, get_results, replay_pending, submit_quiz};
