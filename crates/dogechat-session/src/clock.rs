use std::sync::Mutex;

use jiff::civil::Date;
use jiff::tz::TimeZone;

/// Source of the current calendar day for the rate limiter.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock, UTC calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        jiff::Timestamp::now().to_zoned(TimeZone::UTC).date()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    today: Mutex<Date>,
}

impl ManualClock {
    pub fn new(today: Date) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, day: Date) {
        *self.today.lock().unwrap_or_else(|e| e.into_inner()) = day;
    }
}

impl Clock for ManualClock {
    fn today(&self) -> Date {
        *self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}
