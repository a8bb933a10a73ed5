use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use compass_server::{
    app_state::AppState, auth::JwtService, config::Config, db::Database, handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    let db = Database::connect(&config)
        .await
        .expect("failed to connect to MongoDB");
    let state = AppState::new(config.clone(), &db)
        .await
        .expect("failed to initialize application state");
    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

    let allowed_origin = config.allowed_origin.clone();
    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    log::info!("starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(handlers::get_questions)
            .service(handlers::submit_quiz)
            .service(handlers::replay_pending)
            .service(handlers::get_results)
            .service(handlers::get_career_questions)
            .service(handlers::score_career)
            .service(handlers::health_live)
            .service(handlers::health_ready)
    })
    .bind(bind_addr)?
    .run()
    .await
}
