// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction appended to every prompt whose reply is decoded as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Responda APENAS com o JSON, sem textos adicionais. \
    Não use blocos de código markdown. \
    Não inclua explicações fora do JSON.";

/// Fills `{name}` placeholders in a single left-to-right pass.
/// Substituted values are never scanned again, so user text that happens to contain
/// a placeholder is inserted literally. Braces that name no known key are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let substitution = after.find('}').and_then(|end| {
            values
                .iter()
                .find(|(key, _)| *key == &after[..end])
                .map(|(_, value)| (*value, end))
        });

        match substitution {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
