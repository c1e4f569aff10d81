//! Essay evaluation parser. Converts the model's free-text reply into an `EssayEvaluation`.
//!
//! Flow: split_sections → extract_competencies (one record per COMP<i>) →
//!       extract_suggestions → EssayEvaluation::new (sums the total).
//!
//! Malformed replies never produce an error. Each step falls back to a fixed record or
//! suggestion at the smallest granularity it can, so a garbled reply still yields a
//! well-formed evaluation. Transport failures are handled by the caller, not here.

use tracing::warn;

use crate::writing::competency::{
    Competency, CompetencyScore, EssayEvaluation, COMPETENCY_COUNT, MAX_COMPETENCY_SCORE,
    UNSCORED_FEEDBACK,
};
use crate::writing::prompts::{
    SECTION_DELIMITER, SUGGESTIONS_DELIMITER, SUGGESTIONS_LABEL_VARIANTS,
    SUGGESTION_ITEM_DELIMITER,
};

pub const DEFAULT_SUGGESTION: &str = "Continue praticando para melhorar suas habilidades.";

/// The two blocks of a reply, with the competency block already cut into sections.
#[derive(Debug, PartialEq, Eq)]
pub struct Sections<'a> {
    /// Trimmed, non-empty sections in reply order. May hold fewer or more than five.
    pub competencies: Vec<&'a str>,
    pub suggestions: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
enum ExtractError {
    EmptySection,
}

/// Parses one raw reply. Pure: the same text always yields the same evaluation.
pub fn parse_evaluation(raw: &str) -> EssayEvaluation {
    let sections = split_sections(raw);
    if sections.competencies.is_empty() {
        warn!("Evaluation reply has no competency sections; every competency falls back to zero");
    }

    let competencies = extract_competencies(&sections.competencies);
    let suggestions = extract_suggestions(sections.suggestions);

    EssayEvaluation::new(competencies, suggestions)
}

/// Splits on the first `===`, then cuts the competency block on `---`.
pub fn split_sections(raw: &str) -> Sections<'_> {
    let (competencies_text, suggestions_text) = raw
        .split_once(SUGGESTIONS_DELIMITER)
        .unwrap_or((raw, ""));

    let competencies = competencies_text
        .split(SECTION_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    Sections {
        competencies,
        suggestions: suggestions_text.trim(),
    }
}

/// Builds exactly five records: section `i` feeds competency `i + 1`, sections past the
/// fifth are ignored, and competencies with no section get the "não avaliada" placeholder.
pub fn extract_competencies(sections: &[&str]) -> [CompetencyScore; COMPETENCY_COUNT] {
    Competency::ALL.map(|competency| match sections.get(competency.index() - 1) {
        Some(section) => extract_competency(section, competency),
        None => CompetencyScore::missing(competency),
    })
}

/// Reads one section. Never fails: unreadable sections become the error placeholder.
pub fn extract_competency(section: &str, competency: Competency) -> CompetencyScore {
    try_extract_competency(section, competency).unwrap_or_else(|e| {
        warn!(
            "Could not read section for {}: {e:?}",
            competency.identifier()
        );
        CompetencyScore::extraction_error(competency)
    })
}

fn try_extract_competency(
    section: &str,
    competency: Competency,
) -> Result<CompetencyScore, ExtractError> {
    let mut lines = section.lines().skip_while(|l| l.trim().is_empty());
    let header = lines.next().ok_or(ExtractError::EmptySection)?;

    let score = parse_score(header, competency).unwrap_or(0);

    // Only zero-length lines are dropped; whitespace-only lines stay in the feedback.
    let feedback = lines
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();
    let feedback = if feedback.is_empty() {
        UNSCORED_FEEDBACK.to_string()
    } else {
        feedback
    };

    Ok(CompetencyScore::new(competency, score, feedback))
}

/// Looks for `COMP<i>:` followed by a run of digits. Only unsigned digits are accepted,
/// so `COMP1: -10` is treated as unscored. Values past 200 (including digit runs that
/// overflow `u64`) clamp to 200.
fn parse_score(header: &str, competency: Competency) -> Option<u8> {
    let marker = format!("{}:", competency.identifier());
    let (_, rest) = header.split_once(marker.as_str())?;

    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(value.min(u64::from(MAX_COMPETENCY_SCORE)) as u8)
}

/// Drops the `SUGESTÕES:` label and splits the rest on `-`.
/// An empty result becomes the single default suggestion.
pub fn extract_suggestions(text: &str) -> Vec<String> {
    let body = strip_suggestions_label(text.trim());

    let suggestions: Vec<String> = body
        .split(SUGGESTION_ITEM_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if suggestions.is_empty() {
        vec![DEFAULT_SUGGESTION.to_string()]
    } else {
        suggestions
    }
}

fn strip_suggestions_label(text: &str) -> &str {
    SUGGESTIONS_LABEL_VARIANTS
        .iter()
        .find_map(|label| {
            let end = text
                .char_indices()
                .nth(label.chars().count())
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            (text[..end].to_lowercase() == label.to_lowercase()).then(|| &text[end..])
        })
        .unwrap_or(text)
}
