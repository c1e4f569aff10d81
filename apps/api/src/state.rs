use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LanguageModel;
use crate::quiz::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Production uses `LlmClient`; tests swap in a fake.
    pub llm: Arc<dyn LanguageModel>,
    pub quiz_sessions: SessionRegistry,
}
