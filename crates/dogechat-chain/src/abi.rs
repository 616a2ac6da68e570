//! Minimal ERC-20 ABI helpers: `balanceOf` calldata and uint256 decoding.

use std::str::FromStr;

use alloy_primitives::{Address, U256};

use crate::error::ChainError;

/// `keccak256("balanceOf(address)")[..4]`.
pub const BALANCE_OF_SELECTOR: &str = "0x70a08231";

/// Parse a hex address. Checksum casing is not enforced.
pub fn parse_address(address: &str) -> Result<Address, ChainError> {
    Address::from_str(address.trim()).map_err(|e| ChainError::InvalidAddress(format!("{address}: {e}")))
}

/// Calldata for `balanceOf(owner)`: selector followed by the address
/// left-padded to 32 bytes.
pub fn encode_balance_of(owner: Address) -> String {
    let mut data = String::from(BALANCE_OF_SELECTOR);
    data.push_str(&"0".repeat(24));
    data.push_str(&hex::encode(owner.as_slice()));
    data
}

/// Decode a single uint256 return word from an `eth_call` result.
///
/// An empty result (`0x`) means the call returned nothing, e.g. the target
/// is not a contract, and is reported as malformed.
pub fn decode_uint256(result: &str) -> Result<U256, ChainError> {
    let trimmed = result.trim().trim_start_matches("0x");
    if trimmed.is_empty() {
        return Err(ChainError::MalformedResponse(
            "empty eth_call result".to_string(),
        ));
    }
    if trimmed.len() > 64 {
        return Err(ChainError::MalformedResponse(format!(
            "uint256 result too long ({} hex chars)",
            trimmed.len()
        )));
    }
    U256::from_str_radix(trimmed, 16)
        .map_err(|e| ChainError::MalformedResponse(format!("invalid uint256 {result}: {e}")))
}

/// Render a raw token amount with `decimals` fractional digits.
///
/// Trailing fractional zeros are dropped but one digit always remains, so
/// whole amounts read `12.0`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return format!("{amount}.0");
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let fraction = amount % divisor;

    let padded = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    let fraction = if trimmed.is_empty() { "0" } else { trimmed };

    format!("{whole}.{fraction}")
}
