use std::time::Duration;

use alloy_primitives::{Address, U256};
use serde_json::{Value, json};

use crate::abi::{decode_uint256, encode_balance_of, parse_address};
use crate::error::ChainError;
use crate::gate::{BalanceSource, BoxFuture};

const RPC_TIMEOUT_SECS: u64 = 20;

/// Reads ERC-20 balances with `eth_call` against a JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcBalanceSource {
    client: reqwest::Client,
    rpc_url: String,
    token: Address,
}

impl RpcBalanceSource {
    pub fn new(rpc_url: impl Into<String>, token_address: &str) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(RPC_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
            token: parse_address(token_address)?,
        })
    }

    pub fn token(&self) -> Address {
        self.token
    }

    async fn query_balance(&self, owner: Address) -> Result<U256, ChainError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                {
                    "to": self.token.to_checksum(None),
                    "data": encode_balance_of(owner),
                },
                "latest"
            ]
        });

        let result = rpc_json(&self.client, &self.rpc_url, payload).await?;
        let hex = result.as_str().ok_or_else(|| {
            ChainError::MalformedResponse("eth_call returned non-string result".to_string())
        })?;
        decode_uint256(hex)
    }
}

impl BalanceSource for RpcBalanceSource {
    fn balance_of(&self, owner: Address) -> BoxFuture<'_, Result<U256, ChainError>> {
        Box::pin(self.query_balance(owner))
    }
}

/// POST a JSON-RPC request and return its `result` member.
///
/// HTTP failures, JSON-RPC `error` members (which is how reverts surface),
/// and bodies without a `result` are all errors.
pub async fn rpc_json(
    client: &reqwest::Client,
    rpc_url: &str,
    payload: Value,
) -> Result<Value, ChainError> {
    let resp = client
        .post(rpc_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| ChainError::Transport(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ChainError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(ChainError::Rpc(format!("HTTP {status}: {text}")));
    }

    let body: Value = serde_json::from_str(&text)
        .map_err(|e| ChainError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(err) = body.get("error") {
        return Err(ChainError::Rpc(err.to_string()));
    }

    body.get("result")
        .cloned()
        .ok_or_else(|| ChainError::MalformedResponse("response missing result".to_string()))
}
