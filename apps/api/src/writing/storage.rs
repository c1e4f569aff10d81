//! Essay persistence. Stores an evaluated essay as an opaque payload alongside its inputs.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::essay::EssayRow;
use crate::writing::competency::EssayEvaluation;

/// Everything needed to persist one evaluated essay. The timestamp is assigned by the DB.
pub struct NewEssay<'a> {
    pub user_id: Uuid,
    pub topic: &'a str,
    pub content: &'a str,
    pub support_material: Option<&'a str>,
    pub evaluation: &'a EssayEvaluation,
}

pub async fn save_essay(pool: &PgPool, essay: NewEssay<'_>) -> Result<EssayRow, AppError> {
    let NewEssay {
        user_id,
        topic,
        content,
        support_material,
        evaluation,
    } = essay;

    let row = sqlx::query_as::<_, EssayRow>(
        r#"
        INSERT INTO essays
            (user_id, topic, content, support_material, score, competencies, suggestions)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(topic)
    .bind(content)
    .bind(support_material)
    .bind(i32::from(evaluation.score()))
    .bind(Json(evaluation.competencies().to_vec()))
    .bind(evaluation.suggestions())
    .fetch_one(pool)
    .await?;

    info!(
        "Saved essay {} (score {}) for user {}",
        row.id, row.score, user_id
    );
    Ok(row)
}

/// All essays for a user, newest first.
pub async fn list_essays(pool: &PgPool, user_id: Uuid) -> Result<Vec<EssayRow>, AppError> {
    Ok(sqlx::query_as::<_, EssayRow>(
        "SELECT * FROM essays WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_essay(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<EssayRow, AppError> {
    sqlx::query_as::<_, EssayRow>("SELECT * FROM essays WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Essay {id} not found")))
}

pub async fn delete_essay(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM essays WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Essay {id} not found")));
    }

    info!("Deleted essay {id} for user {user_id}");
    Ok(())
}
