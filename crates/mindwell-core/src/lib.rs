//! mindwell-core
//!
//! Pure domain types and document key conventions. No I/O; this is the
//! shared vocabulary of the check-in, instrument and storage crates.

pub mod doc_keys;
pub mod error;
pub mod models;
pub mod streak;
