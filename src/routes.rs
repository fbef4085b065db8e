// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{question, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges the quiz and question sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (quiz engine, config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:8080"),
            HeaderValue::from_static("http://127.0.0.1:8080"),
            HeaderValue::from_static("http://localhost:3000"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/start", get(quiz::start_quiz))
        // Protected quiz routes
        .merge(
            Router::new()
                .route("/submit", post(quiz::submit_quiz))
                .route("/attempts", get(quiz::list_attempts))
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        );

    let question_routes = Router::new().route("/count", get(question::count_questions));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/questions", question_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
