use mindwell_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    /// A write-once document already holds a different value.
    #[error("document already exists with different content: {key}")]
    AlreadyExists { key: String },

    #[error("write conflict on {key} after {attempts} attempts")]
    Conflict { key: String, attempts: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),

    #[error("storage config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StorageError {
    /// Whether repeating the same call may succeed. Backend and contention
    /// failures are; bad input, missing documents and write-once documents
    /// that already hold other content are not.
    ///
    /// `PreconditionFailed` only succeeds on retry after the caller reloads
    /// the document and takes the new version.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorageError::GetObject(_)
                | StorageError::PutObject(_)
                | StorageError::ListObjects(_)
                | StorageError::Conflict { .. }
                | StorageError::PreconditionFailed { .. }
        )
    }
}
