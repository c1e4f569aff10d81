//! ENEM competency model and the evaluation record built from one model reply.

use serde::{Deserialize, Serialize};

/// Number of fixed grading dimensions. Every evaluation carries exactly this many records.
pub const COMPETENCY_COUNT: usize = 5;
pub const MAX_COMPETENCY_SCORE: u8 = 200;

/// Feedback used when a section was recognized but carried no feedback lines.
pub const UNSCORED_FEEDBACK: &str = "Não foi possível avaliar esta competência.";
/// Feedback used when a section could not be read at all.
pub const EXTRACTION_ERROR_FEEDBACK: &str = "Erro na avaliação desta competência.";
/// Feedback used for competencies the reply never reached.
pub const MISSING_FEEDBACK: &str = "Competência não avaliada.";

/// One of the five fixed ENEM essay-grading dimensions, in grading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Competency {
    NormaCulta,
    CompreensaoDoTema,
    Argumentacao,
    CoesaoTextual,
    PropostaDeIntervencao,
}

impl Competency {
    pub const ALL: [Competency; COMPETENCY_COUNT] = [
        Competency::NormaCulta,
        Competency::CompreensaoDoTema,
        Competency::Argumentacao,
        Competency::CoesaoTextual,
        Competency::PropostaDeIntervencao,
    ];

    /// 1-based position in the grading order.
    pub fn index(self) -> usize {
        match self {
            Competency::NormaCulta => 1,
            Competency::CompreensaoDoTema => 2,
            Competency::Argumentacao => 3,
            Competency::CoesaoTextual => 4,
            Competency::PropostaDeIntervencao => 5,
        }
    }

    /// Internal identifier used in the reply template: `COMP1`..`COMP5`.
    pub fn identifier(self) -> String {
        format!("COMP{}", self.index())
    }

    pub fn label(self) -> &'static str {
        match self {
            Competency::NormaCulta => "Domínio da norma culta",
            Competency::CompreensaoDoTema => "Compreensão do tema",
            Competency::Argumentacao => "Argumentação",
            Competency::CoesaoTextual => "Coesão textual",
            Competency::PropostaDeIntervencao => "Proposta de intervenção",
        }
    }
}

/// Score and feedback for a single competency. `score` never exceeds 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyScore {
    pub name: String,
    pub score: u8,
    pub feedback: String,
}

impl CompetencyScore {
    pub fn new(competency: Competency, score: u8, feedback: String) -> Self {
        Self {
            name: competency.label().to_string(),
            score: score.min(MAX_COMPETENCY_SCORE),
            feedback,
        }
    }

    pub fn extraction_error(competency: Competency) -> Self {
        Self::new(competency, 0, EXTRACTION_ERROR_FEEDBACK.to_string())
    }

    pub fn missing(competency: Competency) -> Self {
        Self::new(competency, 0, MISSING_FEEDBACK.to_string())
    }
}

/// The parsed result of grading one essay.
///
/// Fields are private and only [`EssayEvaluation::new`] builds one, deriving `score`
/// from the competencies, so `score == Σ competencies[i].score` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EssayEvaluation {
    /// 0 – 1000
    score: u16,
    competencies: [CompetencyScore; COMPETENCY_COUNT],
    suggestions: Vec<String>,
}

impl EssayEvaluation {
    pub fn new(
        competencies: [CompetencyScore; COMPETENCY_COUNT],
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            score: total_score(&competencies),
            competencies,
            suggestions,
        }
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    pub fn competencies(&self) -> &[CompetencyScore; COMPETENCY_COUNT] {
        &self.competencies
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

/// Sums the competency scores. At most 5 × 200, so it always fits in `u16`.
pub fn total_score(competencies: &[CompetencyScore]) -> u16 {
    competencies.iter().map(|c| u16::from(c.score)).sum()
}
