use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Display label shown to students.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Iniciante",
            Difficulty::Intermediate => "Intermediário",
            Difficulty::Advanced => "Avançado",
        }
    }

    /// Level wording used inside the generation prompt.
    pub fn prompt_level(self) -> &'static str {
        match self {
            Difficulty::Beginner => "iniciante",
            Difficulty::Intermediate => "intermediário",
            Difficulty::Advanced => "avançado",
        }
    }
}

/// One answer option. The model contract spells the flag `isCorrect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    #[serde(alias = "isCorrect")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub text: String,
    pub options: Vec<QuizOption>,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

/// Request body for quiz generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuizParams {
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(alias = "questionsCount")]
    pub questions_count: u32,
}

/// A ready-to-play quiz, either generated or from the built-in catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    pub id: String,
    pub title: String,
    /// Display label, e.g. "Intermediário".
    pub difficulty: String,
    /// Estimated duration, e.g. "8 min".
    pub time: String,
    pub questions: Vec<QuizQuestion>,
}

impl GeneratedQuiz {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        difficulty: Difficulty,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            difficulty: difficulty.label().to_string(),
            time: estimated_time(questions.len()),
            questions,
        }
    }
}

/// A minute and a half per question, rounded up.
pub fn estimated_time(question_count: usize) -> String {
    format!("{} min", (question_count * 3 + 1) / 2)
}
