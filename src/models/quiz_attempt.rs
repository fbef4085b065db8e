// src/models/quiz_attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quiz_attempts' table in the database.
/// Append-only: rows are inserted once per submission and never updated.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: i64,
    pub user_id: i64,
    pub level: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    /// Integer percentage, 0-100.
    pub score: i32,
    pub attempted_at: chrono::DateTime<chrono::Utc>,
}

/// An attempt that has been scored but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizAttempt {
    pub user_id: i64,
    pub level: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub score: i32,
    pub attempted_at: chrono::DateTime<chrono::Utc>,
}

impl NewQuizAttempt {
    pub fn into_attempt(self, id: i64) -> QuizAttempt {
        QuizAttempt {
            id,
            user_id: self.user_id,
            level: self.level,
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            score: self.score,
            attempted_at: self.attempted_at,
        }
    }
}

/// A single submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: i64,
    #[serde(alias = "selectedOptionIndex")]
    pub selected_option: i32,
}

/// DTO for submitting a quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1))]
    pub level: String,
    #[validate(length(min = 1, max = 200, message = "Between 1 and 200 answers are required."))]
    pub answers: Vec<Answer>,
}

/// Result summary returned to the client after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub total_questions: i32,
    pub correct_answers: i32,
    pub score: i32,
}

/// Query parameters for starting a quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct StartQuizParams {
    pub level: String,
    pub language: Option<String>,
    pub limit: Option<i64>,
}

/// Query parameters for listing attempt history.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptHistoryParams {
    pub limit: Option<i64>,
}
