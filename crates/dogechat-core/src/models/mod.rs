pub mod message;
pub mod rate_limit;
pub mod theme;
pub mod verification;
pub mod wallet;
