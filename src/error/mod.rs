//! Error types and handling module.
//!
//! Defines all client error types and conversions from the alloy stack.

use alloy::primitives::Bytes;
use thiserror::Error;

/// Client-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Conflicting or missing construction parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No known deployment of the contract on the resolved network.
    #[error("No deployment of {contract} known for network {network_id}")]
    UnresolvedAddress { contract: String, network_id: u64 },

    /// Underlying network/provider failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The contract reverted. The revert data is surfaced as-is.
    #[error("Contract reverted: {message}")]
    ContractRevert { message: String, data: Option<Bytes> },

    /// Signing failures.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// A signer was required but the client is read-only.
    #[error("Read-only client: {0}")]
    ReadOnly(String),

    /// The local nonce counter cannot advance any further.
    #[error("Nonce overflow: {0}")]
    NonceOverflow(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// ABI decoding error.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        match err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
            Some(data) => AppError::ContractRevert { message: err.to_string(), data: Some(data) },
            None => AppError::Transport(err.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(err) => err.into(),
            alloy::contract::Error::AbiError(err) => AppError::Decode(err.to_string()),
            other => AppError::Transport(other.to_string()),
        }
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::signers::Error> for AppError {
    fn from(err: alloy::signers::Error) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::hex::FromHexError> for AppError {
    fn from(err: alloy::hex::FromHexError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
