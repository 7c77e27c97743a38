// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{admin, performance, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, performance, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (the store handles).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/subjects", get(quiz::list_subjects))
        .route("/paper/{subject}", get(quiz::get_paper))
        .route("/submit/{subject}", post(quiz::submit_paper));

    let performance_routes = Router::new()
        .route("/history/{user}", get(performance::history))
        .route("/leaderboard", get(performance::leaderboard))
        .route("/distribution", get(performance::distribution));

    let admin_routes = Router::new()
        .route(
            "/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route(
            "/questions/{subject}/{index}",
            put(admin::update_question).delete(admin::delete_question),
        )
        .route("/scores", delete(admin::clear_scores));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/performance", performance_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
