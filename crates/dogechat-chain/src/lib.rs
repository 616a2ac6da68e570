//! dogechat-chain
//!
//! Token-balance verification gate and the wallet connection capability.
//! Talks to the chain through plain JSON-RPC `eth_call`.

pub mod abi;
pub mod error;
pub mod gate;
pub mod rpc;
pub mod wallet;
