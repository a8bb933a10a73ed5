use actix_web::{get, web, HttpResponse};

use crate::db::Database;

#[get("/api/health/live")]
async fn health_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[get("/api/health/ready")]
async fn health_ready(db: web::Data<Database>) -> HttpResponse {
    match db.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "database": "reachable",
        })),
        Err(err) => {
            log::warn!("readiness check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "degraded",
                "database": "unreachable",
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_rt::test]
    async fn test_health_live() {
        let app = test::init_service(App::new().service(health_live)).await;

        let req = test::TestRequest::get().uri("/api/health/live").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
