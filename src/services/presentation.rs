// src/services/presentation.rs

use crate::{
    error::AppError,
    models::question::{Language, PresentedQuestion, Question},
};

/// Resolves a question to one language for the client.
///
/// A missing localization is surfaced as `MissingLocalization`; there is no
/// fallback to another language. The correct option index never leaves here.
pub fn present(question: &Question, language: Language) -> Result<PresentedQuestion, AppError> {
    let missing = || {
        AppError::MissingLocalization(format!(
            "Question {} is unavailable in '{}'",
            question.id(),
            language.code()
        ))
    };

    let text = question.text(language).ok_or_else(missing)?;
    let options = question.options(language).ok_or_else(missing)?;

    Ok(PresentedQuestion {
        id: question.id(),
        text: text.to_string(),
        options: options.to_vec(),
    })
}
