use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_title: String,
    pub score: i32,
    pub total_questions: i32,
    pub created_at: DateTime<Utc>,
}
