//! Client storage key conventions.
//!
//! Plain string keys, no schema versioning. Every value stored under these
//! keys is a plain string.

/// Calendar day (`YYYY-MM-DD`, UTC) the free-tier counter was last reset.
pub const LAST_RESET: &str = "stfudoge_lastReset";

/// Free-tier messages sent on the day stored under [`LAST_RESET`].
pub const MESSAGE_COUNT: &str = "stfudoge_messageCount";

/// Theme preference, `light` or `dark`.
pub const THEME: &str = "stfudoge_theme";
