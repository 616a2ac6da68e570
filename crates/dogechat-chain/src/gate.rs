use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::info;

use dogechat_core::models::verification::VerificationStatus;

use crate::abi::{format_units, parse_address};
use crate::error::ChainError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only token balance lookup.
///
/// Methods return boxed futures for dyn compatibility.
pub trait BalanceSource: Send + Sync {
    fn balance_of(&self, owner: Address) -> BoxFuture<'_, Result<U256, ChainError>>;
}

/// Derives a [`VerificationStatus`] from the gating token's balance.
#[derive(Clone)]
pub struct VerificationGate {
    source: Arc<dyn BalanceSource>,
    decimals: u8,
}

impl VerificationGate {
    pub fn new(source: Arc<dyn BalanceSource>, decimals: u8) -> Self {
        Self { source, decimals }
    }

    /// Verified iff the balance is strictly greater than zero.
    ///
    /// Errors are returned as-is; callers must treat them as not verified.
    pub async fn verify(&self, address: &str) -> Result<VerificationStatus, ChainError> {
        let owner = parse_address(address)?;
        let balance = self.source.balance_of(owner).await?;
        let formatted = format_units(balance, self.decimals);

        info!(address = %owner, balance = %formatted, "token balance checked");

        if balance.is_zero() {
            Ok(VerificationStatus::Denied)
        } else {
            Ok(VerificationStatus::Verified { balance: formatted })
        }
    }
}
