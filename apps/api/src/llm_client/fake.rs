//! In-memory `LanguageModel` for tests. Replays a canned reply and records every request.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionRequest, LanguageModel, LlmError};

enum Reply {
    Text(String),
    ApiError(u16),
    Empty,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
}

pub struct FakeLlm {
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeLlm {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_reply(Reply::ApiError(status))
    }

    pub fn empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeLlm {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
        });

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::ApiError(status) => Err(LlmError::Api {
                status: *status,
                message: "fake failure".to_string(),
            }),
            Reply::Empty => Err(LlmError::EmptyContent),
        }
    }
}
