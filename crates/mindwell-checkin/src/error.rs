use mindwell_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("catalog misconfigured: {0}")]
    CatalogMisconfiguration(String),

    #[error(transparent)]
    InvalidAnswer(#[from] CoreError),

    #[error("question not found: {0}")]
    QuestionNotFound(String),

    #[error("session incomplete: {answered} of 3 questions answered")]
    SessionIncomplete { answered: usize },

    #[error("session already complete")]
    SessionComplete,
}
