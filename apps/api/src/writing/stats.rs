use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::models::essay::EssayRow;
use crate::writing::competency::CompetencyScore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: i32,
}

/// Writing dashboard figures for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EssayStats {
    pub total_essays: usize,
    pub average_score: i32,
    pub best_score: i32,
    pub essays_this_month: usize,
    /// Percent change from the oldest to the newest essay.
    pub improvement_rate: i32,
    pub history: Vec<ScorePoint>,
    /// Competency breakdown of the newest essay.
    pub competencies: Vec<CompetencyScore>,
}

/// Computes dashboard stats. `essays` must be ordered newest first, as `list_essays` returns.
pub fn compute_essay_stats(essays: &[EssayRow], now: DateTime<Utc>) -> EssayStats {
    let (Some(newest), Some(oldest)) = (essays.first(), essays.last()) else {
        return EssayStats::default();
    };

    let total: i64 = essays.iter().map(|e| i64::from(e.score)).sum();
    let average_score = (total as f64 / essays.len() as f64).round() as i32;
    let best_score = essays.iter().map(|e| e.score).max().unwrap_or(0);

    let essays_this_month = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .map(|month_start| {
            essays
                .iter()
                .filter(|e| e.created_at.date_naive() >= month_start)
                .count()
        })
        .unwrap_or(0);

    // A zero baseline has no meaningful percent change.
    let improvement_rate = if essays.len() >= 2 && oldest.score != 0 {
        (f64::from(newest.score - oldest.score) / f64::from(oldest.score) * 100.0).round() as i32
    } else {
        0
    };

    EssayStats {
        total_essays: essays.len(),
        average_score,
        best_score,
        essays_this_month,
        improvement_rate,
        history: essays
            .iter()
            .map(|e| ScorePoint {
                date: e.created_at.date_naive(),
                score: e.score,
            })
            .collect(),
        competencies: newest.competencies.0.clone(),
    }
}
