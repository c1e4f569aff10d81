use axum::{
    extract::State,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::quiz::storage::{compute_quiz_progress, list_quiz_results, QuizProgress};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::writing::stats::{compute_essay_stats, EssayStats};
use crate::writing::storage::list_essays;

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub writing: EssayStats,
    pub quizzes: QuizProgress,
}

/// GET /api/v1/progress
/// Dashboard summary across writing practice and quizzes.
pub async fn handle_progress(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<ProgressResponse>, AppError> {
    let (essays, results) = tokio::try_join!(
        list_essays(&state.db, params.user_id),
        list_quiz_results(&state.db, params.user_id),
    )?;

    Ok(Json(ProgressResponse {
        writing: compute_essay_stats(&essays, Utc::now()),
        quizzes: compute_quiz_progress(&results),
    }))
}
