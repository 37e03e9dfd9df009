//! mindwell-checkin
//!
//! The adaptive daily check-in: question catalog, rule tables, the
//! deterministic opening-question selector and the three-round branching
//! session. Synchronous and free of I/O; persistence lives in
//! `mindwell-storage`.

pub mod catalog;
pub mod error;
pub mod rules;
pub mod selector;
pub mod session;
