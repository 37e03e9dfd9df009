//! mindwell-storage
//!
//! Document storage for check-ins, moods and assessment results. An abstract
//! [`store::DocumentStore`] with an S3 backend (JSON objects, ETag optimistic
//! locking) and an in-memory backend, plus the typed repositories and the
//! streak ledger built on top of it.

pub mod client;
pub mod config;
pub mod documents;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;
