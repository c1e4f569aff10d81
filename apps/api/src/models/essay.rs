use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::writing::competency::CompetencyScore;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EssayRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub content: String,
    pub support_material: Option<String>,
    pub score: i32,
    pub competencies: Json<Vec<CompetencyScore>>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}
