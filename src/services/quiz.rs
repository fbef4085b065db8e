// src/services/quiz.rs

use std::sync::Arc;

use crate::{
    config::MAX_HISTORY_LIMIT,
    error::AppError,
    models::{
        question::{Language, PresentedQuestion},
        quiz_attempt::{Answer, NewQuizAttempt, QuizAttempt, QuizResult},
    },
    services::presentation::present,
    store::{AttemptStore, QuestionStore},
};

/// Quiz session engine.
///
/// Stateless between calls: nothing about a served quiz is remembered, and a
/// submission is scored purely against the question ids it names.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<dyn QuestionStore>,
    attempts: Arc<dyn AttemptStore>,
}

/// Integer percentage, truncated toward zero. `total` must be positive.
fn calculate_score(correct: i32, total: i32) -> i32 {
    // Widened so `correct * 100` cannot overflow; the quotient is at most 100.
    (i64::from(correct) * 100 / i64::from(total)) as i32
}

fn require_level(level: &str) -> Result<(), AppError> {
    if level.trim().is_empty() {
        return Err(AppError::BadRequest("Level must not be blank".to_string()));
    }
    Ok(())
}

impl QuizService {
    pub fn new(questions: Arc<dyn QuestionStore>, attempts: Arc<dyn AttemptStore>) -> Self {
        Self {
            questions,
            attempts,
        }
    }

    /// Samples up to `limit` questions of `level` and presents them in `language`,
    /// keeping the sampled order.
    pub async fn start_quiz(
        &self,
        level: &str,
        language: Language,
        limit: i64,
    ) -> Result<Vec<PresentedQuestion>, AppError> {
        require_level(level)?;
        if limit <= 0 {
            return Err(AppError::BadRequest("Limit must be a positive integer".to_string()));
        }

        let questions = self.questions.sample_by_level(level, limit).await?;

        tracing::debug!(
            "Starting quiz: level={}, language={}, requested={}, served={}",
            level,
            language.code(),
            limit,
            questions.len()
        );

        questions.iter().map(|q| present(q, language)).collect()
    }

    /// Scores a submission and records one attempt.
    ///
    /// All-or-nothing: if any question id is unknown the call fails with
    /// `NotFound` and nothing is stored.
    pub async fn submit_quiz(
        &self,
        user_id: i64,
        level: &str,
        answers: &[Answer],
    ) -> Result<QuizResult, AppError> {
        require_level(level)?;
        if answers.is_empty() {
            return Err(AppError::BadRequest("No answers submitted".to_string()));
        }
        let total = i32::try_from(answers.len())
            .map_err(|_| AppError::BadRequest("Too many answers submitted".to_string()))?;

        let mut ids: Vec<i64> = answers.iter().map(|a| a.question_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let questions = self.questions.find_many(&ids).await?;

        let mut correct = 0;
        for answer in answers {
            let question = questions.get(&answer.question_id).ok_or_else(|| {
                AppError::NotFound(format!("Question {} not found", answer.question_id))
            })?;
            if question.is_correct(answer.selected_option) {
                correct += 1;
            }
        }

        let score = calculate_score(correct, total);

        let attempt_id = self
            .attempts
            .append(NewQuizAttempt {
                user_id,
                level: level.to_string(),
                total_questions: total,
                correct_answers: correct,
                score,
                attempted_at: chrono::Utc::now(),
            })
            .await?;

        tracing::info!(
            "Quiz attempt {} recorded: user={}, level={}, {}/{} correct, score={}",
            attempt_id,
            user_id,
            level,
            correct,
            total,
            score
        );

        Ok(QuizResult {
            total_questions: total,
            correct_answers: correct,
            score,
        })
    }

    /// Most recent attempts of `user_id`, newest first. `limit` is capped.
    pub async fn attempt_history(&self, user_id: i64, limit: i64) -> Result<Vec<QuizAttempt>, AppError> {
        if limit <= 0 {
            return Err(AppError::BadRequest("Limit must be a positive integer".to_string()));
        }
        self.attempts
            .list_for_user(user_id, limit.min(MAX_HISTORY_LIMIT))
            .await
    }

    pub async fn question_count(&self) -> Result<i64, AppError> {
        self.questions.count().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::{
        models::question::{Question, QuestionData},
        store::memory::{InMemoryAttemptStore, InMemoryQuestionStore},
        utils::random::SeededShuffler,
    };

    fn bilingual(id: i64, level: &str, correct: usize) -> Question {
        Question::new(
            id,
            QuestionData {
                level: level.to_string(),
                text: HashMap::from([
                    (Language::En, format!("Question {}", id)),
                    (Language::Ta, format!("கேள்வி {}", id)),
                ]),
                options: HashMap::from([
                    (Language::En, vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()]),
                    (Language::Ta, vec!["அ".to_string(), "ஆ".to_string(), "இ".to_string(), "ஈ".to_string()]),
                ]),
                correct_option_index: correct,
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn english_only(id: i64, level: &str) -> Question {
        Question::new(
            id,
            QuestionData {
                level: level.to_string(),
                text: HashMap::from([(Language::En, format!("Question {}", id))]),
                options: HashMap::from([(Language::En, vec!["yes".to_string(), "no".to_string()])]),
                correct_option_index: 0,
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn service(questions: Vec<Question>) -> (QuizService, Arc<InMemoryAttemptStore>) {
        let attempts = Arc::new(InMemoryAttemptStore::new());
        let store = Arc::new(InMemoryQuestionStore::new(
            questions,
            Arc::new(SeededShuffler::new(11)),
        ));
        (QuizService::new(store, attempts.clone()), attempts)
    }

    fn bank(n: i64) -> Vec<Question> {
        (1..=n).map(|id| bilingual(id, "beginner", (id % 4) as usize)).collect()
    }

    #[test]
    fn test_calculate_score_truncates() {
        assert_eq!(calculate_score(7, 10), 70);
        assert_eq!(calculate_score(1, 3), 33);
        assert_eq!(calculate_score(2, 3), 66);
        assert_eq!(calculate_score(0, 5), 0);
        assert_eq!(calculate_score(4, 4), 100);
    }

    #[test]
    fn test_calculate_score_large_totals() {
        assert_eq!(calculate_score(30_000_000, 30_000_000), 100);
        assert_eq!(calculate_score(i32::MAX / 2, i32::MAX), 49);
    }

    #[tokio::test]
    async fn test_submit_quiz_blank_level() {
        let (quiz, attempts) = service(bank(3));
        let answers = [Answer { question_id: 1, selected_option: 1 }];

        assert!(matches!(
            quiz.submit_quiz(1, "  ", &answers).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(attempts.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_quiz_limit_below_bank() {
        let (quiz, _) = service(bank(10));

        let served = quiz.start_quiz("beginner", Language::En, 4).await.unwrap();
        assert_eq!(served.len(), 4);

        let ids: HashSet<i64> = served.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 4);
        for q in &served {
            assert_eq!(q.text, format!("Question {}", q.id));
            assert_eq!(q.options.len(), 4);
        }
    }

    #[tokio::test]
    async fn test_start_quiz_limit_above_bank() {
        let mut questions = bank(3);
        questions.push(bilingual(50, "advanced", 0));
        let (quiz, _) = service(questions);

        let served = quiz.start_quiz("beginner", Language::Ta, 10).await.unwrap();
        let ids: HashSet<i64> = served.iter().map(|q| q.id).collect();
        assert_eq!(ids, HashSet::from([1, 2, 3]));
        assert!(served.iter().all(|q| q.text.starts_with("கேள்வி")));
    }

    #[tokio::test]
    async fn test_start_quiz_unknown_level_is_empty() {
        let (quiz, _) = service(bank(3));
        assert!(quiz.start_quiz("expert", Language::En, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_quiz_invalid_arguments() {
        let (quiz, _) = service(bank(3));

        assert!(matches!(
            quiz.start_quiz("  ", Language::En, 5).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            quiz.start_quiz("beginner", Language::En, 0).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_start_quiz_missing_localization() {
        let (quiz, _) = service(vec![english_only(1, "beginner")]);

        assert!(matches!(
            quiz.start_quiz("beginner", Language::Ta, 5).await,
            Err(AppError::MissingLocalization(_))
        ));
        assert_eq!(quiz.start_quiz("beginner", Language::En, 5).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_quiz_seventy_percent() {
        let (quiz, attempts) = service(bank(10));

        // Questions 1..=7 answered correctly, 8..=10 off by one.
        let answers: Vec<Answer> = (1..=10)
            .map(|id| {
                let correct = (id % 4) as i32;
                Answer {
                    question_id: id,
                    selected_option: if id <= 7 { correct } else { (correct + 1) % 4 },
                }
            })
            .collect();

        let result = quiz.submit_quiz(42, "beginner", &answers).await.unwrap();
        assert_eq!(
            result,
            QuizResult {
                total_questions: 10,
                correct_answers: 7,
                score: 70
            }
        );

        let stored = attempts.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, 42);
        assert_eq!(stored[0].score, 70);
    }

    #[tokio::test]
    async fn test_submit_quiz_one_of_three() {
        let (quiz, _) = service(bank(3));
        let answers = [
            Answer { question_id: 1, selected_option: 1 },
            Answer { question_id: 2, selected_option: 0 },
            Answer { question_id: 3, selected_option: -1 },
        ];

        let result = quiz.submit_quiz(1, "beginner", &answers).await.unwrap();
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.score, 33);
    }

    #[tokio::test]
    async fn test_submit_quiz_repeated_question_counts_each_answer() {
        let (quiz, _) = service(bank(1));
        let answers = [
            Answer { question_id: 1, selected_option: 1 },
            Answer { question_id: 1, selected_option: 1 },
        ];

        let result = quiz.submit_quiz(1, "beginner", &answers).await.unwrap();
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.correct_answers, 2);
    }

    #[tokio::test]
    async fn test_submit_quiz_empty_answers() {
        let (quiz, attempts) = service(bank(3));

        assert!(matches!(
            quiz.submit_quiz(1, "beginner", &[]).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(attempts.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_quiz_unknown_question_records_nothing() {
        let (quiz, attempts) = service(bank(3));
        let answers = [
            Answer { question_id: 1, selected_option: 1 },
            Answer { question_id: 999, selected_option: 0 },
        ];

        assert!(matches!(
            quiz.submit_quiz(1, "beginner", &answers).await,
            Err(AppError::NotFound(_))
        ));
        assert!(attempts.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_beginner_quiz() {
        let questions = bank(3);
        let correct: HashMap<i64, usize> = questions
            .iter()
            .map(|q| (q.id(), q.correct_option_index()))
            .collect();
        let (quiz, attempts) = service(questions);

        let served = quiz.start_quiz("beginner", Language::En, 5).await.unwrap();
        assert_eq!(served.len(), 3);

        let answers: Vec<Answer> = served
            .iter()
            .map(|q| Answer {
                question_id: q.id,
                selected_option: correct[&q.id] as i32,
            })
            .collect();

        let result = quiz.submit_quiz(7, "beginner", &answers).await.unwrap();
        assert_eq!(
            result,
            QuizResult {
                total_questions: 3,
                correct_answers: 3,
                score: 100
            }
        );

        let stored = attempts.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].level, "beginner");
    }

    #[tokio::test]
    async fn test_attempt_history() {
        let (quiz, _) = service(bank(2));
        let answers = [Answer { question_id: 1, selected_option: 1 }];
        quiz.submit_quiz(5, "beginner", &answers).await.unwrap();
        quiz.submit_quiz(6, "beginner", &answers).await.unwrap();

        let history = quiz.attempt_history(5, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score, 100);

        assert!(matches!(
            quiz.attempt_history(5, 0).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(quiz.question_count().await.unwrap(), 2);
    }
}
