// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::{DEFAULT_HISTORY_LIMIT, DEFAULT_QUIZ_LIMIT},
    error::AppError,
    models::{
        question::Language,
        quiz_attempt::{AttemptHistoryParams, StartQuizParams, SubmitQuizRequest},
    },
    services::quiz::QuizService,
    utils::jwt::CurrentUser,
};

/// Serves a randomized quiz for a level.
///
/// `language` defaults to English and `limit` to 10.
/// Questions are returned without their correct answers.
pub async fn start_quiz(
    State(quiz): State<QuizService>,
    Query(params): Query<StartQuizParams>,
) -> Result<impl IntoResponse, AppError> {
    let language = params
        .language
        .as_deref()
        .map(Language::resolve)
        .unwrap_or(Language::En);
    let limit = params.limit.unwrap_or(DEFAULT_QUIZ_LIMIT);

    let questions = quiz.start_quiz(&params.level, language, limit).await?;

    Ok(Json(questions))
}

/// Scores submitted answers and records the attempt for the authenticated user.
pub async fn submit_quiz(
    State(quiz): State<QuizService>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let result = quiz.submit_quiz(user.user_id, &req.level, &req.answers).await?;

    Ok(Json(result))
}

/// Lists the authenticated user's past attempts, newest first.
pub async fn list_attempts(
    State(quiz): State<QuizService>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AttemptHistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let attempts = quiz.attempt_history(user.user_id, limit).await?;

    Ok(Json(attempts))
}
