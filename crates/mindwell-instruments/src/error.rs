use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("clinical catalog misconfigured: {0}")]
    CatalogMisconfiguration(String),
}
