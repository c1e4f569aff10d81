use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::quiz::QuizResultRow;
use crate::quiz::session::QuizResults;

pub async fn save_quiz_result(
    pool: &PgPool,
    user_id: Uuid,
    quiz_title: &str,
    results: QuizResults,
) -> Result<QuizResultRow, AppError> {
    let row = sqlx::query_as::<_, QuizResultRow>(
        r#"
        INSERT INTO quiz_results (user_id, quiz_title, score, total_questions)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(quiz_title)
    .bind(results.score as i32)
    .bind(results.total_questions as i32)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved quiz result {}/{} for '{}' (user {})",
        row.score, row.total_questions, row.quiz_title, user_id
    );
    Ok(row)
}

/// All quiz results for a user, newest first.
pub async fn list_quiz_results(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<QuizResultRow>, AppError> {
    Ok(sqlx::query_as::<_, QuizResultRow>(
        "SELECT * FROM quiz_results WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuizProgress {
    pub total_quizzes: usize,
    /// Rounded mean of per-quiz percentages.
    pub average_percent: u32,
    pub best_percent: u32,
}

pub fn compute_quiz_progress(results: &[QuizResultRow]) -> QuizProgress {
    let percents: Vec<f64> = results
        .iter()
        .filter(|r| r.total_questions > 0)
        .map(|r| f64::from(r.score) / f64::from(r.total_questions) * 100.0)
        .collect();

    if percents.is_empty() {
        return QuizProgress {
            total_quizzes: results.len(),
            ..QuizProgress::default()
        };
    }

    let average = percents.iter().sum::<f64>() / percents.len() as f64;
    let best = percents.iter().map(|p| p.round() as u32).max().unwrap_or(0);

    QuizProgress {
        total_quizzes: results.len(),
        average_percent: average.round() as u32,
        best_percent: best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(score: i32, total: i32) -> QuizResultRow {
        QuizResultRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            quiz_title: "JavaScript Basics".into(),
            score,
            total_questions: total,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_results() {
        assert_eq!(compute_quiz_progress(&[]), QuizProgress::default());
    }

    #[test]
    fn test_progress_over_results() {
        let progress = compute_quiz_progress(&[result(4, 5), result(2, 3), result(10, 15)]);
        assert_eq!(progress.total_quizzes, 3);
        // (80 + 66.67 + 66.67) / 3 = 71.1
        assert_eq!(progress.average_percent, 71);
        assert_eq!(progress.best_percent, 80);
    }

    #[test]
    fn test_zero_total_rows_are_counted_but_not_averaged() {
        let progress = compute_quiz_progress(&[result(3, 3), result(0, 0)]);
        assert_eq!(progress.total_quizzes, 2);
        assert_eq!(progress.average_percent, 100);
    }
}
