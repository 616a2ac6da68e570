use serde::{Deserialize, Serialize};

/// A connected wallet. Lives for one session; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Hex address with `0x` prefix.
    pub address: String,
    pub chain_id: u64,
    /// RPC endpoint the session's provider talks to.
    pub rpc_url: String,
}

impl WalletSession {
    /// `0x1234...abcd` form used in status lines.
    pub fn short_address(&self) -> String {
        let addr = self.address.as_str();
        if addr.len() <= 10 {
            return addr.to_string();
        }
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    }
}
