// src/handlers/question.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{error::AppError, services::quiz::QuizService};

/// Returns the number of questions in the bank.
pub async fn count_questions(State(quiz): State<QuizService>) -> Result<impl IntoResponse, AppError> {
    let count = quiz.question_count().await?;

    Ok(Json(json!({ "count": count })))
}
