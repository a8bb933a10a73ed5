use std::future::{ready, Ready};

use actix_web::{http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use crate::{
    auth::{Claims, JwtService},
    errors::AppError,
};

/// Extractor for the optional identity on submission endpoints.
///
/// Identity is never required — anonymous attempts are a first-class flow —
/// but a bearer token that is present must be valid: a bad token is an
/// authorization error, not a silent downgrade to anonymous.
pub struct OptionalIdentity(pub Option<Claims>);

impl FromRequest for OptionalIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let auth_header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let Some(auth_header) = auth_header else {
            return ready(Ok(OptionalIdentity(None)));
        };

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            return ready(Err(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            )));
        };

        let Some(jwt_service) = req.app_data::<web::Data<JwtService>>() else {
            return ready(Err(AppError::Unauthorized(
                "Identity verification is not configured".to_string(),
            )));
        };

        ready(jwt_service.validate_token(token).map(|claims| OptionalIdentity(Some(claims))))
    }
}
