//! Quiz flow state machine and the in-memory registry of active sessions.
//!
//! A session walks an ordered question list: select an option (once per question),
//! advance, and show results after the last question. Restart rewinds everything.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::quiz::models::{GeneratedQuiz, QuizQuestion};

#[derive(Debug, Error)]
pub enum QuizSessionError {
    #[error("Quiz has no questions")]
    EmptyQuiz,

    #[error("Option '{0}' does not exist for the current question")]
    UnknownOption(String),
}

/// What the student learns right after answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_option_id: Option<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub score: u32,
    pub total_questions: u32,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_question: usize,
    selected_option: Option<String>,
    answered: bool,
    score: u32,
    show_results: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizSessionError> {
        if questions.is_empty() {
            return Err(QuizSessionError::EmptyQuiz);
        }
        Ok(Self {
            questions,
            current_question: 0,
            selected_option: None,
            answered: false,
            score: 0,
            show_results: false,
        })
    }

    /// The question being answered, or `None` once results are shown.
    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.show_results {
            return None;
        }
        self.questions.get(self.current_question)
    }

    /// Records an answer for the current question.
    ///
    /// Returns `Ok(None)` without touching state when the question was already answered
    /// or the quiz is finished. Option ids not on the current question are rejected.
    pub fn select_option(
        &mut self,
        option_id: &str,
    ) -> Result<Option<AnswerOutcome>, QuizSessionError> {
        if self.answered || self.show_results {
            return Ok(None);
        }

        let question = &self.questions[self.current_question];
        let option = question
            .options
            .iter()
            .find(|o| o.id == option_id)
            .ok_or_else(|| QuizSessionError::UnknownOption(option_id.to_string()))?;

        let outcome = AnswerOutcome {
            correct: option.is_correct,
            correct_option_id: question.correct_option().map(|o| o.id.clone()),
            explanation: question.explanation.clone(),
        };

        self.selected_option = Some(option_id.to_string());
        self.answered = true;
        if outcome.correct {
            self.score += 1;
        }

        Ok(Some(outcome))
    }

    /// Moves to the next question, or to the results after the last one.
    pub fn next_question(&mut self) {
        if self.current_question + 1 < self.questions.len() {
            self.current_question += 1;
            self.selected_option = None;
            self.answered = false;
        } else {
            self.show_results = true;
        }
    }

    pub fn restart(&mut self) {
        self.current_question = 0;
        self.selected_option = None;
        self.answered = false;
        self.score = 0;
        self.show_results = false;
    }

    pub fn results(&self) -> Option<QuizResults> {
        self.show_results.then(|| QuizResults {
            score: self.score,
            total_questions: self.questions.len() as u32,
        })
    }
}

/// Option as shown to the student: correctness stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub text: String,
    pub options: Vec<OptionView>,
}

/// Client-facing snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub title: String,
    pub current_question: usize,
    pub total_questions: usize,
    pub question: Option<QuestionView>,
    pub selected_option: Option<String>,
    pub answered: bool,
    pub score: u32,
    pub show_results: bool,
}

/// A session plus the bookkeeping the service needs around it.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub user_id: Option<Uuid>,
    pub title: String,
    pub session: QuizSession,
    /// Set once the finished attempt has been written to `quiz_results`.
    pub result_saved: bool,
    /// Last time the session was started, read or updated.
    pub last_touched: Instant,
}

impl ActiveSession {
    pub fn view(&self, session_id: Uuid) -> SessionView {
        let s = &self.session;
        SessionView {
            session_id,
            title: self.title.clone(),
            current_question: s.current_question,
            total_questions: s.questions.len(),
            question: s.current().map(|q| QuestionView {
                id: q.id,
                text: q.text.clone(),
                options: q
                    .options
                    .iter()
                    .map(|o| OptionView {
                        id: o.id.clone(),
                        text: o.text.clone(),
                    })
                    .collect(),
            }),
            selected_option: s.selected_option.clone(),
            answered: s.answered,
            score: s.score,
            show_results: s.show_results,
        }
    }
}

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);
/// Upper bound on live sessions; the least recently touched one is evicted past it.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Active quiz sessions keyed by id. Cloning shares the same registry.
///
/// Sessions that are never exited expire after `idle_timeout`, and the registry never
/// holds more than `max_sessions` entries.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, ActiveSession>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRegistry {
    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn start(
        &self,
        quiz: GeneratedQuiz,
        user_id: Option<Uuid>,
    ) -> Result<SessionView, QuizSessionError> {
        let now = Instant::now();
        let active = ActiveSession {
            user_id,
            title: quiz.title,
            session: QuizSession::new(quiz.questions)?,
            result_saved: false,
            last_touched: now,
        };
        let id = Uuid::new_v4();
        let view = active.view(id);

        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, a)| a.last_touched)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!("Quiz session registry full; evicted session {oldest}");
        }
        sessions.insert(id, active);
        Ok(view)
    }

    pub async fn view(&self, id: Uuid) -> Option<SessionView> {
        self.update(id, |active| active.view(id)).await
    }

    /// Runs `f` against the session under the write lock and marks it as touched.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut ActiveSession) -> R) -> Option<R> {
        self.sessions.write().await.get_mut(&id).map(|active| {
            active.last_touched = Instant::now();
            f(active)
        })
    }

    /// Drops every session idle for longer than the timeout. Returns how many were removed.
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, Instant::now())
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, ActiveSession>, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, active| now.duration_since(active.last_touched) <= self.idle_timeout);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Evicted {removed} idle quiz sessions");
        }
        removed
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}
