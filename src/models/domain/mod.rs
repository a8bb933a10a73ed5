pub mod career;
pub mod question;
pub mod submission;
pub mod tier;

pub use career::{CareerChoice, CareerQuestion};
pub use question::{Choice, Question};
pub use submission::{Submission, SubmissionAnswer};
pub use tier::ResultTier;
