//! The document store abstraction and the read-modify-write helpers built
//! on it.
//!
//! Documents are JSON values addressed by `(collection, key)`. Every stored
//! document carries an opaque version (the S3 ETag, or a counter in memory)
//! which conditional writes compare against.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub value: Value,
    pub version: String,
}

/// Condition a write must satisfy to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// Write unconditionally.
    Overwrite,
    /// Only create; fail if the document exists.
    Absent,
    /// Only replace the document at this version.
    Matches(String),
}

/// Backend-agnostic document store.
///
/// A failed precondition is reported as `StorageError::PreconditionFailed`
/// and a missing document as `StorageError::NotFound`, whatever the backend.
pub trait DocumentStore: Send + Sync {
    fn get_document<'a>(&'a self, collection: &'a str, key: &'a str) -> BoxFuture<'a, Result<Document, StorageError>>;

    /// Write `value`, returning the new version.
    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        key: &'a str,
        value: Value,
        precondition: Precondition,
    ) -> BoxFuture<'a, Result<String, StorageError>>;

    /// Keys of the documents directly inside `collection`, sorted.
    fn list_keys<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;
}

/// `get_document` with `NotFound` mapped to `None`.
pub async fn find_document(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
) -> Result<Option<Document>, StorageError> {
    match store.get_document(collection, key).await {
        Ok(doc) => Ok(Some(doc)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match find_document(store, collection, key).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc.value)?)),
        None => Ok(None),
    }
}

pub async fn save<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
    value: &T,
    precondition: Precondition,
) -> Result<String, StorageError> {
    let value = serde_json::to_value(value)?;
    store.put_document(collection, key, value, precondition).await
}

/// Create a document exactly once. Writing the identical value again is a
/// successful no-op, so a retried save after a lost response is safe; a
/// different value already stored is `AlreadyExists`.
pub async fn save_once<T>(store: &dyn DocumentStore, collection: &str, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    match save(store, collection, key, value, Precondition::Absent).await {
        Ok(_) => Ok(()),
        Err(StorageError::PreconditionFailed { key: failed }) => {
            match load::<T>(store, collection, key).await? {
                Some(existing) if existing == *value => Ok(()),
                _ => Err(StorageError::AlreadyExists { key: failed }),
            }
        }
        Err(e) => Err(e),
    }
}

/// Shallow merge: top-level fields of `patch` replace those of `base`, other
/// fields of `base` are kept. A non-object on either side replaces `base`.
pub fn merge_fields(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (field, value) in patch {
                base.insert(field, value);
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Write a document, either replacing it or merging `value`'s fields into
/// the stored ones. Merges are compare-and-swap and retry up to
/// `max_retries` times when another writer gets in first.
pub async fn set_document(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
    value: Value,
    merge: bool,
    max_retries: u32,
) -> Result<(), StorageError> {
    if !merge {
        store
            .put_document(collection, key, value, Precondition::Overwrite)
            .await?;
        return Ok(());
    }

    compare_and_swap(store, collection, key, max_retries, |existing| {
        let mut next = existing.cloned().unwrap_or_else(|| Value::Object(Map::new()));
        merge_fields(&mut next, value.clone());
        Ok((Some(next), ()))
    })
    .await
}

/// Typed read-modify-write. `apply` sees the stored document deserialized
/// into `T` (or `T::default()` when absent) and may be called more than
/// once under contention. The result is merged back into the stored fields,
/// so fields `T` does not know about survive. Nothing is written when `apply`
/// leaves the document unchanged.
pub async fn update<T, R>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
    max_retries: u32,
    mut apply: impl FnMut(&mut T) -> R + Send,
) -> Result<(T, R), StorageError>
where
    T: Serialize + DeserializeOwned + Default + Send,
    R: Send,
{
    compare_and_swap(store, collection, key, max_retries, |existing| {
        let mut typed: T = match existing {
            Some(value) => serde_json::from_value(value.clone())?,
            None => T::default(),
        };
        let outcome = apply(&mut typed);

        let mut next = existing.cloned().unwrap_or_else(|| Value::Object(Map::new()));
        merge_fields(&mut next, serde_json::to_value(&typed)?);
        let write = (existing != Some(&next)).then_some(next);
        Ok((write, (typed, outcome)))
    })
    .await
}

/// Core optimistic-locking loop. `step` maps the current value to the value
/// to write (`None` to skip the write) and an outcome.
async fn compare_and_swap<R>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
    max_retries: u32,
    mut step: impl FnMut(Option<&Value>) -> Result<(Option<Value>, R), StorageError> + Send,
) -> Result<R, StorageError>
where
    R: Send,
{
    let attempts = max_retries.saturating_add(1);
    for attempt in 1..=attempts {
        let current = find_document(store, collection, key).await?;
        let (write, outcome) = step(current.as_ref().map(|doc| &doc.value))?;
        let Some(next) = write else {
            return Ok(outcome);
        };

        let precondition = match current {
            Some(doc) => Precondition::Matches(doc.version),
            None => Precondition::Absent,
        };
        match store.put_document(collection, key, next, precondition).await {
            Ok(_) => return Ok(outcome),
            Err(StorageError::PreconditionFailed { .. }) => {
                tracing::warn!(collection, key, attempt, "concurrent update, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    Err(StorageError::Conflict {
        key: format!("{collection}/{key}"),
        attempts,
    })
}
