use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identity claims minted by the external authentication provider. The
/// engine only consumes these; it never issues real tokens outside tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id at the auth provider)
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(sub: &str, name: &str, email: Option<&str>, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: sub.to_string(),
            name: name.to_string(),
            email: email.map(|e| e.to_string()),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
