// src/store/postgres.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{AttemptStore, QuestionStore, question_not_found, sample};
use crate::{
    error::AppError,
    models::{
        question::{Question, QuestionRow},
        quiz_attempt::{NewQuizAttempt, QuizAttempt},
    },
    utils::random::Shuffler,
};

const QUESTION_COLUMNS: &str = "id, question_en, question_ta, options_en, options_ta, \
     correct_answer, level, explanation_en, explanation_ta, related_image";

pub struct PgQuestionStore {
    pool: PgPool,
    shuffler: Arc<dyn Shuffler>,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool, shuffler: Arc<dyn Shuffler>) -> Self {
        Self { pool, shuffler }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn sample_by_level(&self, level: &str, limit: i64) -> Result<Vec<Question>, AppError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        // The whole level is loaded and shuffled in process: `ORDER BY RANDOM()`
        // would bypass the injected shuffler.
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {} FROM questions WHERE level = $1 ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(level)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions for level {}: {:?}", level, e);
            AppError::from(e)
        })?;

        let candidates = rows
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sample(candidates, limit, self.shuffler.as_ref()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {} FROM questions WHERE id = $1",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch question {}: {:?}", id, e);
            AppError::from(e)
        })?
        .ok_or_else(|| question_not_found(id))?;

        Question::try_from(row)
    }

    async fn find_many(&self, ids: &[i64]) -> Result<HashMap<i64, Question>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Use QueryBuilder for dynamic IN clause
        let mut query_builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM questions WHERE id IN (",
            QUESTION_COLUMNS
        ));

        let mut separated = query_builder.separated(",");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows: Vec<QuestionRow> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch submitted questions: {:?}", e);
                AppError::from(e)
            })?;

        rows.into_iter()
            .map(|row| Question::try_from(row).map(|q| (q.id(), q)))
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

pub struct PgAttemptStore {
    pool: PgPool,
}

impl PgAttemptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PgAttemptStore {
    async fn append(&self, attempt: NewQuizAttempt) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO quiz_attempts
                (user_id, level, total_questions, correct_answers, score, attempted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(attempt.user_id)
        .bind(&attempt.level)
        .bind(attempt.total_questions)
        .bind(attempt.correct_answers)
        .bind(attempt.score)
        .bind(attempt.attempted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz attempt: {:?}", e);
            AppError::from(e)
        })?;

        Ok(id)
    }

    async fn list_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<QuizAttempt>, AppError> {
        let attempts = sqlx::query_as::<_, QuizAttempt>(
            r#"
            SELECT id, user_id, level, total_questions, correct_answers, score, attempted_at
            FROM quiz_attempts
            WHERE user_id = $1
            ORDER BY attempted_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list attempts for user {}: {:?}", user_id, e);
            AppError::from(e)
        })?;

        Ok(attempts)
    }
}
