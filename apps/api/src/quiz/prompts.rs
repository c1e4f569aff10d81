// All LLM prompt constants for the Quiz module.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::quiz::models::Difficulty;

pub const QUIZ_MODEL: &str = "gpt-4o-mini";
pub const QUIZ_TEMPERATURE: f32 = 0.7;

pub const QUIZ_SYSTEM: &str = "Você é um especialista na criação de quizzes educacionais. \
    Responda apenas com o JSON solicitado.";

/// Quiz generation prompt template.
/// Replace: {topic}, {questions_count}, {level}, {json_only}
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Crie um quiz sobre {topic} com {questions_count} perguntas de nível {level}.

As perguntas devem ter 4 opções de resposta cada, com apenas uma resposta correta.
Inclua também uma explicação detalhada para cada pergunta.

Retorne o resultado em JSON com este formato exato:
[
  {
    "id": 1,
    "text": "Texto da pergunta",
    "options": [
      { "id": "a", "text": "Opção A", "isCorrect": false },
      { "id": "b", "text": "Opção B", "isCorrect": true },
      { "id": "c", "text": "Opção C", "isCorrect": false },
      { "id": "d", "text": "Opção D", "isCorrect": false }
    ],
    "explanation": "Explicação da resposta correta"
  }
]

{json_only}"#;

pub fn build_quiz_prompt(topic: &str, questions_count: u32, difficulty: Difficulty) -> String {
    let questions_count = questions_count.to_string();
    fill_template(
        QUIZ_PROMPT_TEMPLATE,
        &[
            ("topic", topic),
            ("questions_count", &questions_count),
            ("level", difficulty.prompt_level()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}
