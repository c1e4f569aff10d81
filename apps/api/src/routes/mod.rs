pub mod health;
pub mod progress;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::quiz::handlers as quiz;
use crate::state::AppState;
use crate::writing::handlers as writing;

/// `?user_id=` query shared by the per-user listing endpoints.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Writing API
        .route("/api/v1/writing/topic", post(writing::handle_generate_topic))
        .route("/api/v1/writing/evaluate", post(writing::handle_evaluate))
        .route("/api/v1/writing/essays", get(writing::handle_list_essays))
        .route(
            "/api/v1/writing/essays/:id",
            get(writing::handle_get_essay).delete(writing::handle_delete_essay),
        )
        .route("/api/v1/writing/stats", get(writing::handle_essay_stats))
        // Quiz API
        .route("/api/v1/quizzes", get(quiz::handle_list_catalog))
        .route("/api/v1/quizzes/generate", post(quiz::handle_generate_quiz))
        .route("/api/v1/quizzes/sessions", post(quiz::handle_start_session))
        .route(
            "/api/v1/quizzes/sessions/:id",
            get(quiz::handle_get_session).delete(quiz::handle_exit_session),
        )
        .route(
            "/api/v1/quizzes/sessions/:id/answer",
            post(quiz::handle_answer),
        )
        .route("/api/v1/quizzes/sessions/:id/next", post(quiz::handle_next))
        .route(
            "/api/v1/quizzes/sessions/:id/restart",
            post(quiz::handle_restart),
        )
        .route("/api/v1/quizzes/results", get(quiz::handle_list_results))
        // Dashboard
        .route("/api/v1/progress", get(progress::handle_progress))
        .with_state(state)
}
