//! Raw S3 object operations used by the S3 document backend.

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Body and ETag of a fetched object.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Conditional write mode for [`put_object`].
#[derive(Debug, Clone, Copy)]
pub enum PutCondition<'a> {
    Unconditional,
    /// `If-None-Match: *`, create only.
    IfAbsent,
    /// `If-Match: <etag>`.
    IfMatch(&'a str),
}

pub async fn get_object(client: &Client, bucket: &str, key: &str) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(|s| s.to_string());
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput { body, etag })
}

/// Put a JSON object. Returns the new ETag, or
/// `StorageError::PreconditionFailed` when `condition` does not hold.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    condition: PutCondition<'_>,
) -> Result<String, StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(JSON_CONTENT_TYPE)
        .body(ByteStream::from(body));

    req = match condition {
        PutCondition::Unconditional => req,
        PutCondition::IfAbsent => req.if_none_match("*"),
        PutCondition::IfMatch(etag) => req.if_match(etag),
    };

    let resp = req.send().await.map_err(|e| {
        let err = e.into_service_error().to_string();
        // 412 on a failed If-Match/If-None-Match, 409 when a concurrent
        // conditional write to the same key is in flight.
        if err.contains("PreconditionFailed") || err.contains("ConditionalRequestConflict") {
            StorageError::PreconditionFailed {
                key: key.to_string(),
            }
        } else {
            StorageError::PutObject(err)
        }
    })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// List object keys under a prefix, following continuation tokens.
pub async fn list_objects(client: &Client, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                keys.push(key.to_string());
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}
