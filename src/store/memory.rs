// src/store/memory.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AttemptStore, QuestionStore, question_not_found, sample};
use crate::{
    error::AppError,
    models::{
        question::Question,
        quiz_attempt::{NewQuizAttempt, QuizAttempt},
    },
    utils::random::Shuffler,
};

/// Question bank held in memory. Questions are immutable, so no locking is needed.
pub struct InMemoryQuestionStore {
    questions: HashMap<i64, Question>,
    shuffler: Arc<dyn Shuffler>,
}

impl InMemoryQuestionStore {
    pub fn new(questions: Vec<Question>, shuffler: Arc<dyn Shuffler>) -> Self {
        let questions = questions.into_iter().map(|q| (q.id(), q)).collect();
        Self {
            questions,
            shuffler,
        }
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn sample_by_level(&self, level: &str, limit: i64) -> Result<Vec<Question>, AppError> {
        let mut candidates: Vec<Question> = self
            .questions
            .values()
            .filter(|q| q.level() == level)
            .cloned()
            .collect();
        // HashMap order is arbitrary; fix it so a seeded shuffler is reproducible.
        candidates.sort_by_key(Question::id);

        Ok(sample(candidates, limit, self.shuffler.as_ref()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Question, AppError> {
        self.questions
            .get(&id)
            .cloned()
            .ok_or_else(|| question_not_found(id))
    }

    async fn find_many(&self, ids: &[i64]) -> Result<HashMap<i64, Question>, AppError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.questions.get(id).map(|q| (*id, q.clone())))
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.questions.len() as i64)
    }
}

/// Append-only attempt log held in memory.
#[derive(Default)]
pub struct InMemoryAttemptStore {
    attempts: RwLock<Vec<QuizAttempt>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored attempt, in insertion order.
    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn append(&self, attempt: NewQuizAttempt) -> Result<i64, AppError> {
        let mut attempts = self.attempts.write().await;
        let id = attempts.len() as i64 + 1;
        attempts.push(attempt.into_attempt(id));
        Ok(id)
    }

    async fn list_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<QuizAttempt>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let attempts = self.attempts.read().await;

        let mut mine: Vec<QuizAttempt> = attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; later ids win ties on equal timestamps.
        mine.sort_by(|a, b| {
            b.attempted_at
                .cmp(&a.attempted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        mine.truncate(limit);
        Ok(mine)
    }
}
