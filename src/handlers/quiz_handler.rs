use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::OptionalIdentity,
    errors::AppError,
    models::dto::request::{ReplayPendingRequest, SubmitQuizRequest},
    models::dto::response::SubmitQuizResponse,
    services::SubmissionOutcome,
};

/// The active question catalog, in display order.
#[get("/api/quiz/questions")]
async fn get_questions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let questions = state.catalog_service.quiz_questions().await?;
    Ok(HttpResponse::Ok().json(questions))
}

/// Submit a completed attempt. Safe under at-least-once delivery: a retry
/// or duplicate click with the same session token resolves to the same
/// unique id instead of a second submission.
#[post("/api/quiz/submissions")]
async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
    identity: OptionalIdentity,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .submission_service
        .submit(request.into_inner(), identity.0)
        .await?;
    Ok(submission_response(outcome))
}

/// Replay a pending attempt persisted while the user was anonymous. Stale
/// or malformed envelopes are rejected outright.
#[post("/api/quiz/submissions/replay")]
async fn replay_pending(
    state: web::Data<AppState>,
    request: web::Json<ReplayPendingRequest>,
    identity: OptionalIdentity,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .submission_service
        .replay_pending(request.into_inner(), identity.0)
        .await?;
    Ok(submission_response(outcome))
}

#[get("/api/quiz/results/{unique_id}")]
async fn get_results(
    state: web::Data<AppState>,
    unique_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let results = state.results_service.get_results(&unique_id).await?;
    Ok(HttpResponse::Ok().json(results))
}

fn submission_response(outcome: SubmissionOutcome) -> HttpResponse {
    let body = SubmitQuizResponse {
        unique_id: outcome.unique_id,
        already_submitted: outcome.already_submitted,
    };
    if body.already_submitted {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::Created().json(body)
    }
}
