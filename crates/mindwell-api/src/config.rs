use std::env;

use mindwell_storage::config::StoreConfig;
use mindwell_storage::error::StorageError;

pub const DEFAULT_USER_HEADER: &str = "x-mindwell-user";

/// Runtime configuration of the API, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub store: StoreConfig,
    /// Header carrying the user id, set by the upstream authorizer after it
    /// has verified the caller's token.
    pub user_header: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            user_header: DEFAULT_USER_HEADER.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, StorageError> {
        Ok(Self {
            store: StoreConfig::from_env()?,
            user_header: env::var("MINDWELL_USER_HEADER")
                .map(|h| h.to_ascii_lowercase())
                .unwrap_or_else(|_| DEFAULT_USER_HEADER.to_string()),
        })
    }
}
