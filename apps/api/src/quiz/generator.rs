//! Quiz generation: one JSON-contract LLM call turned into a playable `GeneratedQuiz`.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{complete_json, CompletionRequest, LanguageModel};
use crate::quiz::models::{GenerateQuizParams, GeneratedQuiz, QuizQuestion};
use crate::quiz::prompts::{build_quiz_prompt, QUIZ_MODEL, QUIZ_SYSTEM, QUIZ_TEMPERATURE};

pub const GENERATED_QUIZ_ID: &str = "generated";
pub const MIN_TOPIC_CHARS: usize = 3;
pub const MIN_QUESTIONS: u32 = 3;
pub const MAX_QUESTIONS: u32 = 15;

pub fn validate_params(params: &GenerateQuizParams) -> Result<(), AppError> {
    if params.topic.trim().chars().count() < MIN_TOPIC_CHARS {
        return Err(AppError::Validation(format!(
            "topic must have at least {MIN_TOPIC_CHARS} characters"
        )));
    }
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&params.questions_count) {
        return Err(AppError::Validation(format!(
            "questions_count must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"
        )));
    }
    Ok(())
}

pub async fn generate_quiz(
    llm: &dyn LanguageModel,
    params: &GenerateQuizParams,
) -> Result<GeneratedQuiz, AppError> {
    validate_params(params)?;
    let topic = params.topic.trim();

    let prompt = build_quiz_prompt(topic, params.questions_count, params.difficulty);
    let questions: Vec<QuizQuestion> = complete_json(
        llm,
        CompletionRequest {
            model: QUIZ_MODEL,
            system: QUIZ_SYSTEM,
            prompt: &prompt,
            temperature: Some(QUIZ_TEMPERATURE),
            max_tokens: None,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Quiz generation failed: {e}")))?;

    if questions.is_empty() {
        return Err(AppError::Llm(
            "Quiz generation returned no questions".to_string(),
        ));
    }

    if questions.len() != params.questions_count as usize {
        warn!(
            "Requested {} questions about '{topic}', model returned {}",
            params.questions_count,
            questions.len()
        );
    }
    for question in questions.iter().filter(|q| q.correct_option().is_none()) {
        warn!("Generated question {} has no correct option", question.id);
    }

    info!(
        "Generated quiz about '{topic}' with {} questions",
        questions.len()
    );

    Ok(GeneratedQuiz::new(
        GENERATED_QUIZ_ID,
        format!("{topic} Quiz"),
        params.difficulty,
        questions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeLlm;
    use crate::quiz::models::Difficulty;

    const QUESTIONS_JSON: &str = r#"[
        {
            "id": 1,
            "text": "Qual organela realiza a fotossíntese?",
            "options": [
                {"id": "a", "text": "Mitocôndria", "isCorrect": false},
                {"id": "b", "text": "Cloroplasto", "isCorrect": true},
                {"id": "c", "text": "Ribossomo", "isCorrect": false},
                {"id": "d", "text": "Núcleo", "isCorrect": false}
            ],
            "explanation": "O cloroplasto contém clorofila."
        },
        {
            "id": 2,
            "text": "Qual gás é liberado na fotossíntese?",
            "options": [
                {"id": "a", "text": "Oxigênio", "isCorrect": true},
                {"id": "b", "text": "Nitrogênio", "isCorrect": false},
                {"id": "c", "text": "Hélio", "isCorrect": false},
                {"id": "d", "text": "Metano", "isCorrect": false}
            ],
            "explanation": "A quebra da água libera O2."
        },
        {
            "id": 3,
            "text": "Qual pigmento absorve luz?",
            "options": [
                {"id": "a", "text": "Clorofila", "isCorrect": true},
                {"id": "b", "text": "Melanina", "isCorrect": false},
                {"id": "c", "text": "Hemoglobina", "isCorrect": false},
                {"id": "d", "text": "Queratina", "isCorrect": false}
            ],
            "explanation": "A clorofila absorve luz azul e vermelha."
        }
    ]"#;

    fn params(topic: &str, count: u32) -> GenerateQuizParams {
        GenerateQuizParams {
            topic: topic.to_string(),
            difficulty: Difficulty::Intermediate,
            questions_count: count,
        }
    }

    #[tokio::test]
    async fn test_generate_quiz_builds_playable_quiz() {
        let llm = FakeLlm::replying(format!("```json\n{QUESTIONS_JSON}\n```"));

        let quiz = generate_quiz(&llm, &params("Fotossíntese", 3)).await.unwrap();

        assert_eq!(quiz.id, GENERATED_QUIZ_ID);
        assert_eq!(quiz.title, "Fotossíntese Quiz");
        assert_eq!(quiz.difficulty, "Intermediário");
        assert_eq!(quiz.time, "5 min");
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.questions[0].correct_option().unwrap().id, "b");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, QUIZ_MODEL);
        assert!(requests[0]
            .prompt
            .contains("Crie um quiz sobre Fotossíntese com 3 perguntas de nível intermediário."));
    }

    #[tokio::test]
    async fn test_invalid_params_skip_the_llm() {
        let llm = FakeLlm::replying(QUESTIONS_JSON);

        let short_topic = generate_quiz(&llm, &params("ab", 5)).await.unwrap_err();
        let too_many = generate_quiz(&llm, &params("História", 16)).await.unwrap_err();
        let too_few = generate_quiz(&llm, &params("História", 2)).await.unwrap_err();

        assert!(matches!(short_topic, AppError::Validation(_)));
        assert!(matches!(too_many, AppError::Validation(_)));
        assert!(matches!(too_few, AppError::Validation(_)));
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_reply_is_llm_error() {
        let llm = FakeLlm::replying("Desculpe, não posso ajudar com isso.");
        let err = generate_quiz(&llm, &params("História", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_empty_question_list_is_llm_error() {
        let llm = FakeLlm::replying("[]");
        let err = generate_quiz(&llm, &params("História", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_llm_error() {
        let llm = FakeLlm::failing(502);
        let err = generate_quiz(&llm, &params("História", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
