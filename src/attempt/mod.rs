pub mod pending;
pub mod state;

pub use pending::{PendingAttempt, PENDING_ATTEMPT_KEY, PENDING_ATTEMPT_VERSION};
pub use state::{Attempt, AttemptPhase, InMemoryTokenStore, TokenStore};
