pub mod career_service;
pub mod catalog_service;
pub mod results_service;
pub mod scoring;
pub mod submission_service;

pub use career_service::CareerService;
pub use catalog_service::CatalogService;
pub use results_service::ResultsService;
pub use scoring::ScoringService;
pub use submission_service::{SubmissionOutcome, SubmissionService};
