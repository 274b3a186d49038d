//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::{env, path::PathBuf};

use alloy::primitives::Address;

use crate::{
    error::AppError,
    ethereum::{ConnectionConfig, SignerOrProvider},
};

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL. A public endpoint is used when absent.
    pub rpc_url: Option<String>,
    /// Private key for a local signer (hex string, 0x prefix optional).
    pub private_key: Option<String>,
    /// Account override for node-managed accounts.
    pub account: Option<Address>,
    /// Network (chain) ID override.
    pub network_id: Option<u64>,
    /// Use the accounts managed by the node behind `rpc_url`.
    pub use_node_accounts: bool,
    /// Directory with Truffle-style build artifacts.
    pub artifacts_dir: Option<PathBuf>,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `DEVERY_RPC_URL`: Ethereum JSON-RPC endpoint
    /// - `DEVERY_PRIVATE_KEY`: Private key for a local signer (hex)
    /// - `DEVERY_ACCOUNT`: Node-managed account to sign with
    /// - `DEVERY_NETWORK_ID`: Network ID (default: from the node, or 1)
    /// - `DEVERY_USE_NODE_ACCOUNTS`: `true` to sign with node-managed accounts
    /// - `DEVERY_ARTIFACTS_DIR`: Build artifacts with deployment addresses
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let rpc_url = non_empty_var("DEVERY_RPC_URL");
        let private_key = non_empty_var("DEVERY_PRIVATE_KEY");

        let account = non_empty_var("DEVERY_ACCOUNT")
            .map(|s| {
                s.parse::<Address>()
                    .map_err(|e| AppError::Config(format!("Invalid DEVERY_ACCOUNT: {e}")))
            })
            .transpose()?;

        let network_id = non_empty_var("DEVERY_NETWORK_ID").map(|s| s.parse()).transpose()?;

        let use_node_accounts = non_empty_var("DEVERY_USE_NODE_ACCOUNTS")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let artifacts_dir = non_empty_var("DEVERY_ARTIFACTS_DIR").map(PathBuf::from);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            rpc_url,
            private_key,
            account,
            network_id,
            use_node_accounts,
            artifacts_dir,
            log_level,
        })
    }

    /// Build the connection parameters described by this configuration.
    pub fn connection(&self) -> ConnectionConfig {
        let signer_or_provider = match (&self.rpc_url, self.use_node_accounts) {
            (Some(url), true) => SignerOrProvider::NodeAccounts(url.clone()),
            (Some(url), false) => SignerOrProvider::Provider(url.clone()),
            (None, _) => SignerOrProvider::None,
        };

        ConnectionConfig {
            signer_or_provider,
            private_key: self.private_key.clone(),
            account: self.account,
            network_id: self.network_id,
            ..ConnectionConfig::default()
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
