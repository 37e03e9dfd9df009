//! In-process document store, used by tests and local runs.

use std::collections::BTreeMap;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::store::{BoxFuture, Document, DocumentStore, Precondition};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    documents: BTreeMap<(String, String), Document>,
    last_version: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all collections.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn path(collection: &str, key: &str) -> String {
    format!("{collection}/{key}")
}

impl DocumentStore for MemoryStore {
    fn get_document<'a>(&'a self, collection: &'a str, key: &'a str) -> BoxFuture<'a, Result<Document, StorageError>> {
        Box::pin(async move {
            let inner = self.inner.lock().await;
            inner
                .documents
                .get(&(collection.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    key: path(collection, key),
                })
        })
    }

    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        key: &'a str,
        value: Value,
        precondition: Precondition,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().await;
            let id = (collection.to_string(), key.to_string());
            let current = inner.documents.get(&id).map(|doc| doc.version.as_str());

            let allowed = match (&precondition, current) {
                (Precondition::Overwrite, _) => true,
                (Precondition::Absent, existing) => existing.is_none(),
                (Precondition::Matches(expected), Some(version)) => expected == version,
                (Precondition::Matches(_), None) => false,
            };
            if !allowed {
                return Err(StorageError::PreconditionFailed {
                    key: path(collection, key),
                });
            }

            inner.last_version += 1;
            let version = inner.last_version.to_string();
            inner.documents.insert(
                id,
                Document {
                    value,
                    version: version.clone(),
                },
            );
            Ok(version)
        })
    }

    fn list_keys<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move {
            let inner = self.inner.lock().await;
            Ok(inner
                .documents
                .keys()
                .filter(|(c, _)| c == collection)
                .map(|(_, k)| k.clone())
                .collect())
        })
    }
}
