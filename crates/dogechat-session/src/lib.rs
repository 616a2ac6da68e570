//! dogechat-session
//!
//! Per-session chat logic: the free-tier rate limiter, the conversation log
//! and its upstream trimming policy, and the chat controller that ties them
//! to the verification gate and the chat backend.

pub mod clock;
pub mod controller;
pub mod conversation;
pub mod error;
pub mod limiter;
pub mod view;
