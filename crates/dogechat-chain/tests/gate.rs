use std::sync::Arc;

use alloy_primitives::{Address, U256};
use dogechat_chain::error::{ChainError, WalletError};
use dogechat_chain::gate::{BalanceSource, BoxFuture, VerificationGate};
use dogechat_chain::wallet::{StaticWallet, WalletConnector, require_project_id};
use dogechat_core::config::ChainConfig;
use dogechat_core::models::verification::VerificationStatus;

const HOLDER: &str = "0x1234567890abcdef1234567890abcdef12345678";

struct FixedBalance(U256);

impl BalanceSource for FixedBalance {
    fn balance_of(&self, _owner: Address) -> BoxFuture<'_, Result<U256, ChainError>> {
        let balance = self.0;
        Box::pin(async move { Ok(balance) })
    }
}

struct BrokenRpc;

impl BalanceSource for BrokenRpc {
    fn balance_of(&self, _owner: Address) -> BoxFuture<'_, Result<U256, ChainError>> {
        Box::pin(async { Err(ChainError::Transport("connection refused".to_string())) })
    }
}

#[tokio::test]
async fn positive_balance_verifies() {
    let gate = VerificationGate::new(
        Arc::new(FixedBalance(U256::from(2_500_000_000_000_000_000u128))),
        18,
    );
    let status = gate.verify(HOLDER).await.unwrap();
    assert_eq!(
        status,
        VerificationStatus::Verified {
            balance: "2.5".to_string()
        }
    );
    assert!(status.is_verified());
}

#[tokio::test]
async fn zero_balance_is_denied() {
    let gate = VerificationGate::new(Arc::new(FixedBalance(U256::ZERO)), 18);
    let status = gate.verify(HOLDER).await.unwrap();
    assert_eq!(status, VerificationStatus::Denied);
    assert!(!status.is_verified());
}

#[tokio::test]
async fn rpc_failure_is_an_error() {
    let gate = VerificationGate::new(Arc::new(BrokenRpc), 18);
    let err = gate.verify(HOLDER).await.unwrap_err();
    assert!(matches!(err, ChainError::Transport(_)));
}

#[tokio::test]
async fn bad_address_never_reaches_the_source() {
    let gate = VerificationGate::new(Arc::new(BrokenRpc), 18);
    let err = gate.verify("0xnope").await.unwrap_err();
    assert!(matches!(err, ChainError::InvalidAddress(_)));
}

#[tokio::test]
async fn static_wallet_checksums_address() {
    let wallet = StaticWallet::new(
        Some("0xd8d01a667a8feef10077c61018b4f8fa533703ed".to_string()),
        &ChainConfig::default(),
    );
    let session = wallet.connect().await.unwrap();
    assert!(
        session
            .address
            .eq_ignore_ascii_case("0xd8d01A667A8fEeF10077c61018b4F8fA533703eD")
    );
    assert_ne!(session.address, session.address.to_lowercase());
    assert_eq!(session.chain_id, 56);
}

#[tokio::test]
async fn static_wallet_without_address_is_declined() {
    let wallet = StaticWallet::new(Some("   ".to_string()), &ChainConfig::default());
    assert!(matches!(
        wallet.connect().await.unwrap_err(),
        WalletError::Declined(_)
    ));
}

#[test]
fn project_id_is_required() {
    assert!(matches!(require_project_id(None), Err(WalletError::Config(_))));
    assert!(matches!(require_project_id(Some("")), Err(WalletError::Config(_))));
    assert_eq!(require_project_id(Some("abc123")).unwrap(), "abc123");
}
