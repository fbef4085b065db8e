// src/store/mod.rs

//! Storage seams for questions and attempts.
//!
//! The quiz engine only talks to these traits, so the Postgres-backed stores
//! and the in-memory ones are interchangeable.

pub mod memory;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        question::Question,
        quiz_attempt::{NewQuizAttempt, QuizAttempt},
    },
    utils::random::Shuffler,
};

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Up to `limit` questions of `level`, in random order, without repetition.
    /// A non-positive `limit` yields an empty list.
    async fn sample_by_level(&self, level: &str, limit: i64) -> Result<Vec<Question>, AppError>;

    /// Fails with `NotFound` if no question has this id.
    async fn find_by_id(&self, id: i64) -> Result<Question, AppError>;

    /// Batch lookup. Ids without a matching question are simply absent from the map.
    async fn find_many(&self, ids: &[i64]) -> Result<HashMap<i64, Question>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Inserts the attempt and returns its id.
    async fn append(&self, attempt: NewQuizAttempt) -> Result<i64, AppError>;

    /// Most recent attempts of a user, newest first.
    async fn list_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<QuizAttempt>, AppError>;
}

/// Shuffles the full candidate set, then truncates to `limit`.
pub(crate) fn sample(candidates: Vec<Question>, limit: i64, shuffler: &dyn Shuffler) -> Vec<Question> {
    if limit <= 0 {
        return Vec::new();
    }
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);

    let mut shuffled = shuffler.shuffled(candidates);
    shuffled.truncate(limit);
    shuffled
}

pub(crate) fn question_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Question {} not found", id))
}
