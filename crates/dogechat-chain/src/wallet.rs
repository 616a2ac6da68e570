use dogechat_core::config::ChainConfig;
use dogechat_core::models::wallet::WalletSession;

use crate::abi::parse_address;
use crate::error::WalletError;
use crate::gate::BoxFuture;

/// The wallet-connection capability: prompts the user and yields a session.
pub trait WalletConnector: Send + Sync {
    fn connect(&self) -> BoxFuture<'_, Result<WalletSession, WalletError>>;
}

/// Connector for an address the user typed in. No signing capability.
#[derive(Debug, Clone)]
pub struct StaticWallet {
    address: Option<String>,
    chain_id: u64,
    rpc_url: String,
}

impl StaticWallet {
    pub fn new(address: Option<String>, chain: &ChainConfig) -> Self {
        Self {
            address,
            chain_id: chain.chain_id,
            rpc_url: chain.rpc_url.clone(),
        }
    }

    fn session(&self) -> Result<WalletSession, WalletError> {
        let raw = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| WalletError::Declined("no address supplied".to_string()))?;

        let address =
            parse_address(raw).map_err(|e| WalletError::InvalidAddress(e.to_string()))?;

        Ok(WalletSession {
            address: address.to_checksum(None),
            chain_id: self.chain_id,
            rpc_url: self.rpc_url.clone(),
        })
    }
}

impl WalletConnector for StaticWallet {
    fn connect(&self) -> BoxFuture<'_, Result<WalletSession, WalletError>> {
        let result = self.session();
        Box::pin(async move { result })
    }
}

/// A wallet-connect project id must be configured before any connection.
pub fn require_project_id(project_id: Option<&str>) -> Result<&str, WalletError> {
    project_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| WalletError::Config("wallet-connect project id is not configured".to_string()))
}
