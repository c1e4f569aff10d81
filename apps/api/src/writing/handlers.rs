//! Axum route handlers for the Writing API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::essay::EssayRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::writing::competency::EssayEvaluation;
use crate::writing::evaluator::{evaluate_essay, generate_topic, EssayTopic};
use crate::writing::stats::{compute_essay_stats, EssayStats};
use crate::writing::storage::{delete_essay, get_essay, list_essays, save_essay, NewEssay};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub topic: String,
    pub content: String,
    pub support_material: Option<String>,
    /// When present, the evaluated essay is stored for this user.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation: EssayEvaluation,
    pub essay_id: Option<Uuid>,
}

/// POST /api/v1/writing/topic
pub async fn handle_generate_topic(
    State(state): State<AppState>,
) -> Result<Json<EssayTopic>, AppError> {
    let topic = generate_topic(state.llm.as_ref()).await?;
    Ok(Json(topic))
}

/// POST /api/v1/writing/evaluate
///
/// Grades the essay and, for a known user, persists it with its evaluation.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    AppJson(request): AppJson<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let evaluation = evaluate_essay(state.llm.as_ref(), &request.topic, &request.content).await?;

    let essay_id = match request.user_id {
        Some(user_id) => {
            let row = save_essay(
                &state.db,
                NewEssay {
                    user_id,
                    topic: &request.topic,
                    content: &request.content,
                    support_material: request.support_material.as_deref(),
                    evaluation: &evaluation,
                },
            )
            .await?;
            Some(row.id)
        }
        None => None,
    };

    Ok(Json(EvaluateResponse {
        evaluation,
        essay_id,
    }))
}

/// GET /api/v1/writing/essays
pub async fn handle_list_essays(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<EssayRow>>, AppError> {
    Ok(Json(list_essays(&state.db, params.user_id).await?))
}

/// GET /api/v1/writing/essays/:id
pub async fn handle_get_essay(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<EssayRow>, AppError> {
    Ok(Json(get_essay(&state.db, params.user_id, id).await?))
}

/// DELETE /api/v1/writing/essays/:id
pub async fn handle_delete_essay(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_essay(&state.db, params.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/writing/stats
pub async fn handle_essay_stats(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<EssayStats>, AppError> {
    let essays = list_essays(&state.db, params.user_id).await?;
    Ok(Json(compute_essay_stats(&essays, Utc::now())))
}
