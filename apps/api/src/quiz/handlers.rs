//! Axum route handlers for the Quiz API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::quiz::QuizResultRow;
use crate::quiz::catalog::{find_catalog_quiz, list_catalog, CatalogEntry};
use crate::quiz::generator::generate_quiz;
use crate::quiz::models::{GenerateQuizParams, GeneratedQuiz};
use crate::quiz::session::{AnswerOutcome, SessionView};
use crate::quiz::storage::{list_quiz_results, save_quiz_result};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Finished attempts are recorded for this user when present.
    pub user_id: Option<Uuid>,
    pub catalog_id: Option<String>,
    pub quiz: Option<GeneratedQuiz>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option_id: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// `None` when the question was already answered.
    pub outcome: Option<AnswerOutcome>,
    pub session: SessionView,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Quiz session {id} not found"))
}

/// GET /api/v1/quizzes
pub async fn handle_list_catalog() -> Json<Vec<CatalogEntry>> {
    Json(list_catalog())
}

/// POST /api/v1/quizzes/generate
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    AppJson(params): AppJson<GenerateQuizParams>,
) -> Result<Json<GeneratedQuiz>, AppError> {
    let quiz = generate_quiz(state.llm.as_ref(), &params).await?;
    Ok(Json(quiz))
}

/// POST /api/v1/quizzes/sessions
///
/// Starts a session from exactly one of `catalog_id` or an inline generated `quiz`.
pub async fn handle_start_session(
    State(state): State<AppState>,
    AppJson(request): AppJson<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let quiz = match (request.catalog_id, request.quiz) {
        (Some(id), None) => find_catalog_quiz(&id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz '{id}' not found")))?,
        (None, Some(quiz)) => quiz,
        _ => {
            return Err(AppError::Validation(
                "provide exactly one of catalog_id or quiz".to_string(),
            ))
        }
    };

    let view = state.quiz_sessions.start(quiz, request.user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/quizzes/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state
        .quiz_sessions
        .view(id)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/quizzes/sessions/:id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let (outcome, session) = state
        .quiz_sessions
        .update(id, |active| {
            let outcome = active.session.select_option(&request.option_id)?;
            Ok::<_, AppError>((outcome, active.view(id)))
        })
        .await
        .ok_or_else(|| session_not_found(id))??;

    Ok(Json(AnswerResponse { outcome, session }))
}

/// POST /api/v1/quizzes/sessions/:id/next
///
/// Advances the session. The first time a user's session reaches its results,
/// the attempt is written to `quiz_results`.
pub async fn handle_next(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (view, pending) = state
        .quiz_sessions
        .update(id, |active| {
            active.session.next_question();
            let pending = match (active.user_id, active.session.results()) {
                (Some(user_id), Some(results)) if !active.result_saved => {
                    active.result_saved = true;
                    Some((user_id, active.title.clone(), results))
                }
                _ => None,
            };
            (active.view(id), pending)
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    // The write happens outside the registry lock; a failed insert releases the claim.
    if let Some((user_id, title, results)) = pending {
        if let Err(e) = save_quiz_result(&state.db, user_id, &title, results).await {
            warn!("Could not record quiz result for session {id}: {e}");
            state
                .quiz_sessions
                .update(id, |active| active.result_saved = false)
                .await;
            return Err(e);
        }
    }

    Ok(Json(view))
}

/// POST /api/v1/quizzes/sessions/:id/restart
pub async fn handle_restart(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state
        .quiz_sessions
        .update(id, |active| {
            active.session.restart();
            active.result_saved = false;
            active.view(id)
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/quizzes/sessions/:id
pub async fn handle_exit_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.quiz_sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// GET /api/v1/quizzes/results
pub async fn handle_list_results(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<QuizResultRow>>, AppError> {
    Ok(Json(list_quiz_results(&state.db, params.user_id).await?))
}
