//! dogechat-core
//!
//! Pure domain types, storage key conventions, and the pinned chat
//! configuration. No network or storage dependency; this is the shared
//! vocabulary of the dogechat crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_keys;
