//! S3 document backend. Each document is one JSON object; its ETag is the
//! version used for optimistic locking.

use aws_sdk_s3::Client;
use serde_json::Value;

use crate::client;
use crate::config::StoreConfig;
use crate::error::StorageError;
use crate::objects::{self, PutCondition};
use crate::store::{BoxFuture, Document, DocumentStore, Precondition};

#[derive(Clone)]
pub struct S3DocumentStore {
    client: Client,
    config: StoreConfig,
}

impl S3DocumentStore {
    pub fn new(client: Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    pub async fn from_config(config: StoreConfig) -> Self {
        let client = client::build_client(&config).await;
        Self::new(client, config)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Keep only objects directly inside the collection, as bare keys.
fn document_keys(object_keys: Vec<String>, prefix: &str) -> Vec<String> {
    let mut keys: Vec<String> = object_keys
        .iter()
        .filter_map(|k| k.strip_prefix(prefix)?.strip_suffix(".json"))
        .filter(|k| !k.is_empty() && !k.contains('/'))
        .map(str::to_string)
        .collect();
    keys.sort();
    keys
}

impl DocumentStore for S3DocumentStore {
    fn get_document<'a>(&'a self, collection: &'a str, key: &'a str) -> BoxFuture<'a, Result<Document, StorageError>> {
        Box::pin(async move {
            let object_key = self.config.object_key(collection, key);
            let output = objects::get_object(&self.client, &self.config.bucket, &object_key).await?;
            let value: Value = serde_json::from_slice(&output.body)?;
            Ok(Document {
                value,
                version: output.etag.unwrap_or_default(),
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
            let object_key = self.config.object_key(collection, key);
            let body = serde_json::to_vec_pretty(&value)?;
            let condition = match &precondition {
                Precondition::Overwrite => PutCondition::Unconditional,
                Precondition::Absent => PutCondition::IfAbsent,
                Precondition::Matches(etag) => PutCondition::IfMatch(etag),
            };
            objects::put_object(&self.client, &self.config.bucket, &object_key, body, condition).await
        })
    }

    fn list_keys<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move {
            let prefix = self.config.collection_prefix(collection);
            let object_keys = objects::list_objects(&self.client, &self.config.bucket, &prefix).await?;
            Ok(document_keys(object_keys, &prefix))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_keys_skip_nested_and_foreign_objects() {
        let listed = vec![
            "p/users/u1/moods/2025-03-11.json".to_string(),
            "p/users/u1/moods/2025-03-10.json".to_string(),
            "p/users/u1/moods/archive/2024-01-01.json".to_string(),
            "p/users/u1/moods/notes.txt".to_string(),
        ];
        assert_eq!(
            document_keys(listed, "p/users/u1/moods/"),
            ["2025-03-10", "2025-03-11"]
        );
    }
}
