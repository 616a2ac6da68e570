//! dogechat-storage
//!
//! Persistent client key/value storage. Plain string keys and values, no
//! schema versioning, no cross-process locking.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;
pub mod theme;
