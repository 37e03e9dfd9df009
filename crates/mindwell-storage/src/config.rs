//! Store configuration, read from the environment.

use std::env;

use crate::error::StorageError;

pub const DEFAULT_BUCKET: &str = "mindwell";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub bucket: String,
    /// Optional key prefix, so several environments can share a bucket.
    pub prefix: Option<String>,
    pub region: String,
    /// Extra attempts a compare-and-swap update makes after losing a race.
    pub max_conflict_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            prefix: None,
            region: DEFAULT_REGION.to_string(),
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl StoreConfig {
    /// `MINDWELL_BUCKET`, `MINDWELL_PREFIX`, `AWS_REGION` and
    /// `MINDWELL_MAX_CONFLICT_RETRIES`, each falling back to its default.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let defaults = Self::default();
        let max_conflict_retries = match lookup("MINDWELL_MAX_CONFLICT_RETRIES") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                StorageError::Config(format!("MINDWELL_MAX_CONFLICT_RETRIES must be a number, got {raw:?}"))
            })?,
            None => defaults.max_conflict_retries,
        };

        Ok(Self {
            bucket: lookup("MINDWELL_BUCKET")
                .filter(|b| !b.is_empty())
                .unwrap_or(defaults.bucket),
            prefix: lookup("MINDWELL_PREFIX")
                .map(|p| p.trim_matches('/').to_string())
                .filter(|p| !p.is_empty()),
            region: lookup("AWS_REGION")
                .filter(|r| !r.is_empty())
                .unwrap_or(defaults.region),
            max_conflict_retries,
        })
    }

    /// Object key of a document: `{prefix}/{collection}/{key}.json`.
    pub fn object_key(&self, collection: &str, key: &str) -> String {
        format!("{}{collection}/{key}.json", self.key_prefix())
    }

    /// Listing prefix of a collection, with trailing slash.
    pub fn collection_prefix(&self, collection: &str) -> String {
        format!("{}{collection}/", self.key_prefix())
    }

    fn key_prefix(&self) -> String {
        self.prefix
            .as_deref()
            .map(|p| format!("{p}/"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.max_conflict_retries, 5);
    }

    #[test]
    fn reads_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("MINDWELL_BUCKET", "wellbeing-prod"),
            ("MINDWELL_PREFIX", "/staging/"),
            ("AWS_REGION", "eu-west-1"),
            ("MINDWELL_MAX_CONFLICT_RETRIES", "9"),
        ]))
        .unwrap();
        assert_eq!(config.bucket, "wellbeing-prod");
        assert_eq!(config.prefix.as_deref(), Some("staging"));
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.max_conflict_retries, 9);
    }

    #[test]
    fn rejects_non_numeric_retries() {
        let err = StoreConfig::from_lookup(lookup(&[("MINDWELL_MAX_CONFLICT_RETRIES", "lots")])).unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn object_keys_carry_prefix() {
        let mut config = StoreConfig::default();
        assert_eq!(config.object_key("users/u1/moods", "2025-03-10"), "users/u1/moods/2025-03-10.json");
        config.prefix = Some("staging".into());
        assert_eq!(config.object_key("users/u1/moods", "2025-03-10"), "staging/users/u1/moods/2025-03-10.json");
        assert_eq!(config.collection_prefix("users/u1/moods"), "staging/users/u1/moods/");
    }
}
