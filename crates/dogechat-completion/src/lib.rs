//! dogechat-completion
//!
//! Chat-completion wire types, the upstream backend capability, the HTTP
//! client for the proxy forwarder, and the persona post-processing policy.

pub mod chat;
pub mod client;
pub mod error;
pub mod persona;
