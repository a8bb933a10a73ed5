use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::CareerScoreRequest,
};

#[get("/api/career/questions")]
async fn get_career_questions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let questions = state.catalog_service.career_questions().await?;
    Ok(HttpResponse::Ok().json(questions))
}

/// Score a completed career answer set and return the interest categories
/// ranked by normalized affinity.
#[post("/api/career/scores")]
async fn score_career(
    state: web::Data<AppState>,
    request: web::Json<CareerScoreRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.career_service.score(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
