use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Free-tier counter as persisted in client storage.
///
/// `count` is only meaningful while `date` equals the current calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    pub date: Date,
    pub count: u32,
}

/// Result of consulting the free-tier quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    pub count: u32,
    pub limit_reached: bool,
}

impl LimitCheck {
    /// Messages left today under a cap of `max`.
    pub fn remaining(&self, max: u32) -> u32 {
        max.saturating_sub(self.count)
    }
}
