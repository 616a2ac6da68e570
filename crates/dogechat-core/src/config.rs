//! Deploy-time chat configuration.
//!
//! [`ChatConfig::default`] is the production set. A JSON config file can
//! override any field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Current config version. Bump this when adding fields or changing shape.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    /// Daily message cap for unverified users.
    pub max_free_messages: u32,
    /// Most recent messages sent upstream per turn.
    pub history_limit: usize,
    pub models: ModelConfig,
    pub chain: ChainConfig,
    /// Wallet-connect project id. Wallet connection is unavailable without it.
    pub walletconnect_project_id: Option<String>,
    /// Chat endpoint of the proxy forwarder.
    pub proxy_url: String,
    /// Upper bound on a single upstream round trip.
    pub reply_timeout_secs: u64,
    /// Probability of a meme placeholder after a verified reply.
    pub meme_chance: f64,
}

/// Upstream model identifiers per tier. Opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub free: String,
    pub verified: String,
}

/// Gating token and the chain it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_url: String,
    pub token_address: String,
    pub token_symbol: String,
    pub token_decimals: u8,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION,
            max_free_messages: 3,
            history_limit: 10,
            models: ModelConfig::default(),
            chain: ChainConfig::default(),
            walletconnect_project_id: None,
            proxy_url: "http://127.0.0.1:3000/api/chat".to_string(),
            reply_timeout_secs: 30,
            meme_chance: 0.03,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            free: "openchat/openchat-7b:free".to_string(),
            verified: "openai/gpt-3.5-turbo".to_string(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 56,
            chain_name: "BNB Smart Chain".to_string(),
            rpc_url: "https://bsc-dataseed.binance.org/".to_string(),
            token_address: "0xd8d01A667A8fEeF10077c61018b4F8fA533703eD".to_string(),
            token_symbol: "$STFU".to_string(),
            token_decimals: 18,
        }
    }
}

impl ChatConfig {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }

    /// Model id for the given tier.
    pub fn model_for(&self, verified: bool) -> &str {
        if verified {
            &self.models.verified
        } else {
            &self.models.free
        }
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.history_limit == 0 {
            return Err(CoreError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if self.reply_timeout_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "reply_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.meme_chance) {
            return Err(CoreError::InvalidConfig(format!(
                "meme_chance must be within 0..=1, got {}",
                self.meme_chance
            )));
        }
        // 10^77 is the largest power of ten a uint256 holds.
        if self.chain.token_decimals > 77 {
            return Err(CoreError::InvalidConfig(format!(
                "token_decimals {} exceeds uint256 range",
                self.chain.token_decimals
            )));
        }
        if self.models.free.is_empty() || self.models.verified.is_empty() {
            return Err(CoreError::InvalidConfig(
                "model identifiers must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
