// All LLM prompt constants for the Writing module.
//
// The evaluation template and `writing::parser` form one contract: the markers below are
// what the model is told to emit and what the parser looks for. Change them together and
// bump TEMPLATE_VERSION.

use crate::llm_client::prompts::fill_template;

pub const TEMPLATE_VERSION: u32 = 1;

/// Separates the competency block from the suggestions block.
pub const SUGGESTIONS_DELIMITER: &str = "===";
/// Separates one competency section from the next.
pub const SECTION_DELIMITER: &str = "---";
/// Labels the suggestions block. Matched case-insensitively, along with the variants below.
pub const SUGGESTIONS_LABEL: &str = "SUGESTÕES:";
pub const SUGGESTIONS_LABEL_VARIANTS: &[&str] = &[SUGGESTIONS_LABEL, "SUGESTOES:", "SUGGESTIONS:"];
pub const SUGGESTION_ITEM_DELIMITER: char = '-';

pub const EVALUATION_MODEL: &str = "gpt-3.5-turbo";
pub const EVALUATION_TEMPERATURE: f32 = 0.3;
pub const EVALUATION_MAX_TOKENS: u32 = 2000;

pub const EVALUATION_SYSTEM: &str = "Você é um avaliador especialista do ENEM. \
    Forneça uma avaliação detalhada seguindo ESTRITAMENTE o formato especificado.";

/// The exact reply layout the model must follow.
pub const RESPONSE_FORMAT: &str = "COMP1: [NÚMERO]
[FEEDBACK]
---
COMP2: [NÚMERO]
[FEEDBACK]
---
COMP3: [NÚMERO]
[FEEDBACK]
---
COMP4: [NÚMERO]
[FEEDBACK]
---
COMP5: [NÚMERO]
[FEEDBACK]
===
SUGESTÕES:
- [SUGESTÃO 1]
- [SUGESTÃO 2]
- [SUGESTÃO 3]";

/// Evaluation prompt template. Replace `{topic}`, `{content}` and `{response_format}`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Tema: {topic}

Redação:
{content}

Avalie rigorosamente seguindo este formato exato:
{response_format}

Onde:
- [NÚMERO] deve ser um valor entre 0 e 200
- [FEEDBACK] deve ser um texto explicativo
- Mantenha exatamente os separadores '---' e '==='"#;

pub fn build_evaluation_prompt(topic: &str, content: &str) -> String {
    fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("topic", topic),
            ("content", content),
            ("response_format", RESPONSE_FORMAT),
        ],
    )
}

pub const TOPIC_MODEL: &str = "gpt-4";

pub const TOPIC_SYSTEM: &str = "Você é um especialista em temas de redação do ENEM. \
    Gere um tema atual e relevante, incluindo textos motivadores.";

pub const TOPIC_PROMPT: &str = "Gere um tema de redação do ENEM com 3 textos motivadores. \
    Formate a resposta com o tema em uma linha e os textos motivadores numerados abaixo.";
