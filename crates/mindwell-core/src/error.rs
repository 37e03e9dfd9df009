use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid answer for '{question_id}': {reason}")]
    InvalidAnswer { question_id: String, reason: String },

    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
