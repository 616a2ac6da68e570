use serde::{Deserialize, Serialize};

/// Outcome of the token-balance gate for the connected wallet.
///
/// Only [`VerificationStatus::Verified`] grants unlimited access. Every
/// other state, including a failed check, is treated as not verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No check has been performed in this session.
    #[default]
    Unchecked,
    /// A balance query is in flight.
    Checking,
    /// Positive balance. `balance` is the formatted token amount.
    Verified { balance: String },
    /// Checked, zero balance.
    Denied,
    /// The balance query could not complete.
    Failed { reason: String },
}

impl VerificationStatus {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified { .. })
    }
}
