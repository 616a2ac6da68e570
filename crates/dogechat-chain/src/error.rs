use thiserror::Error;

/// Balance query failures. All of them leave the user unverified.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC transport failed: {0}")]
    Transport(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("malformed RPC response: {0}")]
    MalformedResponse(String),
}

/// Wallet connection failures.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Missing wallet-connect project id or similar deploy-time gap.
    #[error("wallet configuration error: {0}")]
    Config(String),

    /// The wallet capability never became ready.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),

    /// The user cancelled or rejected the connection.
    #[error("wallet connection declined: {0}")]
    Declined(String),

    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),
}
