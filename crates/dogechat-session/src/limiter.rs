//! Daily free-tier message quota kept in client storage.
//!
//! Two keys back the quota: the day of the last reset and the count for
//! that day. The count is only trusted when the stored day is today; any
//! other day (or none) resets it to zero before it is read.
//!
//! Callers check the limit right before accepting a message and increment
//! only once the message is accepted. There is no cross-process locking, so
//! two front-ends sharing a store can race on the counter.

use std::sync::Arc;

use tracing::debug;

use dogechat_core::models::rate_limit::{LimitCheck, RateLimitRecord};
use dogechat_core::storage_keys;
use dogechat_storage::error::StorageError;
use dogechat_storage::store::KeyValueStore;

use crate::clock::Clock;

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    max_free_messages: u32,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, max_free_messages: u32) -> Self {
        Self {
            store,
            clock,
            max_free_messages,
        }
    }

    pub fn max_free_messages(&self) -> u32 {
        self.max_free_messages
    }

    /// Current count and whether the cap is reached, resetting on a new day.
    pub fn check_limit(&self) -> Result<LimitCheck, StorageError> {
        let today = self.clock.today().to_string();
        let last_reset = self.store.get(storage_keys::LAST_RESET)?;

        let count = if last_reset.as_deref() == Some(today.as_str()) {
            self.store
                .get(storage_keys::MESSAGE_COUNT)?
                .and_then(|c| c.trim().parse::<u32>().ok())
                .unwrap_or(0)
        } else {
            self.store.set(storage_keys::MESSAGE_COUNT, "0")?;
            self.store.set(storage_keys::LAST_RESET, &today)?;
            debug!(day = %today, "free-tier counter reset");
            0
        };

        Ok(LimitCheck {
            count,
            limit_reached: count >= self.max_free_messages,
        })
    }

    /// Record one accepted free-tier message.
    pub fn increment(&self) -> Result<LimitCheck, StorageError> {
        let count = self.check_limit()?.count.saturating_add(1);
        self.store
            .set(storage_keys::MESSAGE_COUNT, &count.to_string())?;

        debug!(count, max = self.max_free_messages, "free-tier message counted");

        Ok(LimitCheck {
            count,
            limit_reached: count >= self.max_free_messages,
        })
    }

    /// Messages left today, floored at zero.
    pub fn remaining(&self) -> Result<u32, StorageError> {
        Ok(self.check_limit()?.remaining(self.max_free_messages))
    }

    /// Raw stored record, without applying the day-rollover rule.
    ///
    /// `None` when nothing has been stored yet or the stored day is not a
    /// valid `YYYY-MM-DD`.
    pub fn stored_record(&self) -> Result<Option<RateLimitRecord>, StorageError> {
        let Some(date) = self
            .store
            .get(storage_keys::LAST_RESET)?
            .and_then(|d| d.parse().ok())
        else {
            return Ok(None);
        };
        let count = self
            .store
            .get(storage_keys::MESSAGE_COUNT)?
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0);
        Ok(Some(RateLimitRecord { date, count }))
    }
}
