//! Essay evaluation and topic generation, the two LLM-backed writing operations.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{CompletionRequest, LanguageModel};
use crate::writing::competency::EssayEvaluation;
use crate::writing::parser::parse_evaluation;
use crate::writing::prompts::{
    build_evaluation_prompt, EVALUATION_MAX_TOKENS, EVALUATION_MODEL, EVALUATION_SYSTEM,
    EVALUATION_TEMPERATURE, TEMPLATE_VERSION, TOPIC_MODEL, TOPIC_PROMPT, TOPIC_SYSTEM,
};

/// A generated essay prompt: the topic line plus its motivating texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayTopic {
    pub topic: String,
    pub support_material: String,
}

/// Grades one essay with a single model call.
///
/// Any failure of the call itself (transport, non-2xx, empty completion) is returned as
/// `AppError::EvaluationFailed` with no partial result. Whatever text comes back is parsed
/// without failing; see `writing::parser`.
pub async fn evaluate_essay(
    llm: &dyn LanguageModel,
    topic: &str,
    content: &str,
) -> Result<EssayEvaluation, AppError> {
    let prompt = build_evaluation_prompt(topic, content);

    let raw = llm
        .complete(CompletionRequest {
            model: EVALUATION_MODEL,
            system: EVALUATION_SYSTEM,
            prompt: &prompt,
            temperature: Some(EVALUATION_TEMPERATURE),
            max_tokens: Some(EVALUATION_MAX_TOKENS),
        })
        .await
        .map_err(|e| AppError::EvaluationFailed(e.to_string()))?;

    let evaluation = parse_evaluation(&raw);
    info!(
        "Essay evaluated: score={}/1000 (template v{TEMPLATE_VERSION})",
        evaluation.score()
    );

    Ok(evaluation)
}

/// Asks the model for a fresh ENEM topic with motivating texts.
pub async fn generate_topic(llm: &dyn LanguageModel) -> Result<EssayTopic, AppError> {
    let raw = llm
        .complete(CompletionRequest {
            model: TOPIC_MODEL,
            system: TOPIC_SYSTEM,
            prompt: TOPIC_PROMPT,
            temperature: None,
            max_tokens: None,
        })
        .await
        .map_err(|e| AppError::Llm(format!("Topic generation failed: {e}")))?;

    split_topic_reply(&raw)
        .ok_or_else(|| AppError::Llm("Topic generation returned no topic line".to_string()))
}

/// First non-blank line is the topic; everything after it is support material.
fn split_topic_reply(raw: &str) -> Option<EssayTopic> {
    let trimmed = raw.trim();
    let (topic, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let topic = topic.trim();
    if topic.is_empty() {
        return None;
    }

    Some(EssayTopic {
        topic: topic.to_string(),
        support_material: rest.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeLlm;
    use crate::writing::competency::Competency;
    use crate::writing::parser::DEFAULT_SUGGESTION;
    use crate::writing::prompts::RESPONSE_FORMAT;

    const REPLY: &str = "COMP1: 160\nPoucos desvios.\n---\nCOMP2: 160\nTema bem abordado.\n---\n\
        COMP3: 140\nArgumentos previsíveis.\n---\nCOMP4: 120\nRepetição de conectivos.\n---\n\
        COMP5: 100\nProposta incompleta.\n===\nSUGESTÕES:\n- Detalhe o agente da proposta.";

    #[tokio::test]
    async fn test_evaluate_essay_makes_one_call_and_parses() {
        let llm = FakeLlm::replying(REPLY);

        let evaluation = evaluate_essay(&llm, "Desafios da educação", "Minha redação.")
            .await
            .unwrap();

        assert_eq!(evaluation.score(), 680);
        assert_eq!(evaluation.competencies()[4].feedback, "Proposta incompleta.");
        assert_eq!(evaluation.suggestions(), vec!["Detalhe o agente da proposta."]);

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, EVALUATION_MODEL);
        assert_eq!(requests[0].system, EVALUATION_SYSTEM);
        assert!(requests[0].prompt.contains("Tema: Desafios da educação"));
        assert!(requests[0].prompt.contains("Minha redação."));
    }

    #[tokio::test]
    async fn test_transport_failure_is_evaluation_failed_without_retry() {
        let llm = FakeLlm::failing(500);

        let err = evaluate_essay(&llm, "Tema", "Texto").await.unwrap_err();

        assert!(matches!(err, AppError::EvaluationFailed(_)));
        assert_eq!(llm.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_completion_is_evaluation_failed() {
        let llm = FakeLlm::empty();
        let err = evaluate_essay(&llm, "Tema", "Texto").await.unwrap_err();
        assert!(matches!(err, AppError::EvaluationFailed(_)));
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades_instead_of_failing() {
        let llm = FakeLlm::replying("Como modelo de linguagem, prefiro não dar notas.");

        let evaluation = evaluate_essay(&llm, "Tema", "Texto").await.unwrap();

        assert_eq!(evaluation.score(), 0);
        assert_eq!(evaluation.competencies().len(), 5);
        assert_eq!(evaluation.suggestions(), vec![DEFAULT_SUGGESTION]);
    }

    /// Echoing the literal reply layout back must land every marker where the parser
    /// expects it. Guards the prompt/parser contract against one-sided edits.
    #[tokio::test]
    async fn test_template_conformance_with_literal_format() {
        let llm = FakeLlm::replying(RESPONSE_FORMAT);

        let evaluation = evaluate_essay(&llm, "Tema", "Texto").await.unwrap();

        assert_eq!(evaluation.score(), 0);
        for (record, competency) in evaluation.competencies().iter().zip(Competency::ALL) {
            assert_eq!(record.name, competency.label());
            assert_eq!(record.feedback, "[FEEDBACK]");
        }
        assert_eq!(
            evaluation.suggestions(),
            vec!["[SUGESTÃO 1]", "[SUGESTÃO 2]", "[SUGESTÃO 3]"]
        );
    }

    #[tokio::test]
    async fn test_template_conformance_with_filled_scores() {
        let llm = FakeLlm::replying(RESPONSE_FORMAT.replace("[NÚMERO]", "120"));

        let evaluation = evaluate_essay(&llm, "Tema", "Texto").await.unwrap();

        assert_eq!(evaluation.score(), 600);
        assert!(evaluation.competencies().iter().all(|c| c.score == 120));
    }

    #[tokio::test]
    async fn test_generate_topic_splits_first_line() {
        let llm = FakeLlm::replying(
            "Os desafios da mobilidade urbana no Brasil\n1. Texto um.\n2. Texto dois.\n3. Texto três.",
        );

        let topic = generate_topic(&llm).await.unwrap();

        assert_eq!(topic.topic, "Os desafios da mobilidade urbana no Brasil");
        assert_eq!(
            topic.support_material,
            "1. Texto um.\n2. Texto dois.\n3. Texto três."
        );
        assert_eq!(llm.requests()[0].model, TOPIC_MODEL);
    }

    #[tokio::test]
    async fn test_generate_topic_failure_is_llm_error() {
        let llm = FakeLlm::failing(401);
        let err = generate_topic(&llm).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_split_topic_reply_skips_leading_blank_lines() {
        let topic = split_topic_reply("\n\n  Tema central  \n\nTexto motivador.").unwrap();
        assert_eq!(topic.topic, "Tema central");
        assert_eq!(topic.support_material, "Texto motivador.");
    }

    #[test]
    fn test_split_topic_reply_blank_is_none() {
        assert!(split_topic_reply("  \n ").is_none());
    }
}
