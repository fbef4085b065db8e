// src/models/question.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

use crate::error::AppError;

/// Supported content languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ta,
}

impl Language {
    /// Resolves a client-supplied language code.
    /// `"ta"` (any case) selects Tamil, everything else falls back to English.
    pub fn resolve(code: &str) -> Self {
        if code.eq_ignore_ascii_case("ta") {
            Language::Ta
        } else {
            Language::En
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }
}

/// Raw parts of a question, validated by [`Question::new`].
#[derive(Debug, Clone, Default)]
pub struct QuestionData {
    pub level: String,
    pub text: HashMap<Language, String>,
    pub options: HashMap<Language, Vec<String>>,
    pub correct_option_index: usize,
    pub explanation: HashMap<Language, String>,
    pub related_image: Option<String>,
}

/// A bilingual multiple-choice question.
///
/// Fields are private: a `Question` can only be obtained through [`Question::new`],
/// so every instance satisfies the localization and answer-index invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: i64,
    level: String,
    text: HashMap<Language, String>,
    options: HashMap<Language, Vec<String>>,
    correct_option_index: usize,
    explanation: HashMap<Language, String>,
    related_image: Option<String>,
}

impl Question {
    pub fn new(id: i64, data: QuestionData) -> Result<Self, AppError> {
        if data.text.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Question {} must have text in at least one language",
                id
            )));
        }

        for (language, options) in &data.options {
            if options.is_empty() {
                return Err(AppError::BadRequest(format!(
                    "Question {} has an empty option list for '{}'",
                    id,
                    language.code()
                )));
            }
            if data.correct_option_index >= options.len() {
                return Err(AppError::BadRequest(format!(
                    "Question {} correct option {} is out of range for '{}' ({} options)",
                    id,
                    data.correct_option_index,
                    language.code(),
                    options.len()
                )));
            }
        }

        Ok(Self {
            id,
            level: data.level,
            text: data.text,
            options: data.options,
            correct_option_index: data.correct_option_index,
            explanation: data.explanation,
            related_image: data.related_image,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn text(&self, language: Language) -> Option<&str> {
        self.text.get(&language).map(String::as_str)
    }

    pub fn options(&self, language: Language) -> Option<&[String]> {
        self.options.get(&language).map(Vec::as_slice)
    }

    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    pub fn explanation(&self, language: Language) -> Option<&str> {
        self.explanation.get(&language).map(String::as_str)
    }

    pub fn related_image(&self) -> Option<&str> {
        self.related_image.as_deref()
    }

    /// Whether `selected` is the canonical correct option.
    /// Negative selections are never correct.
    pub fn is_correct(&self, selected: i32) -> bool {
        usize::try_from(selected).is_ok_and(|s| s == self.correct_option_index)
    }
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub question_en: Option<String>,
    pub question_ta: Option<String>,
    pub options_en: Option<Json<Vec<String>>>,
    pub options_ta: Option<Json<Vec<String>>>,
    pub correct_answer: i32,
    pub level: String,
    pub explanation_en: Option<String>,
    pub explanation_ta: Option<String>,
    pub related_image: Option<String>,
}

/// A stored row violating the question invariants is a data fault, not a client error.
impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let correct_option_index = usize::try_from(row.correct_answer).map_err(|_| {
            AppError::InternalServerError(format!(
                "Question {} has negative correct answer {}",
                row.id, row.correct_answer
            ))
        })?;

        let mut text = HashMap::new();
        let mut options = HashMap::new();
        let mut explanation = HashMap::new();

        for (language, t, o, e) in [
            (Language::En, row.question_en, row.options_en, row.explanation_en),
            (Language::Ta, row.question_ta, row.options_ta, row.explanation_ta),
        ] {
            if let Some(t) = t {
                text.insert(language, t);
            }
            if let Some(Json(o)) = o {
                options.insert(language, o);
            }
            if let Some(e) = e {
                explanation.insert(language, e);
            }
        }

        let data = QuestionData {
            level: row.level,
            text,
            options,
            correct_option_index,
            explanation,
            related_image: row.related_image,
        };

        Question::new(row.id, data).map_err(|e| match e {
            AppError::BadRequest(msg) => AppError::InternalServerError(msg),
            other => other,
        })
    }
}

/// DTO for sending a question to the client.
/// Resolved to one language; carries no answer data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedQuestion {
    pub id: i64,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
}
