//! Devery Client Library
//!
//! Client SDK for the Devery product registry and anti-counterfeiting
//! contracts. Resolves a provider and signer, binds to the deployed
//! contracts, and exposes typed read/write methods and event listeners.
//!
//! # Features
//!
//! - **Connection Resolution**: Public endpoint, custom RPC, node-managed
//!   accounts, or a private key, resolved once at construction
//! - **Sequential Nonces**: Concurrent sends through one account never
//!   collide on a nonce
//! - **Contract Façades**: Registry (apps, brands, products, marking),
//!   owner/admin management and the product NFT
//! - **Event Listeners**: At most one listener per event name
//!
//! # Example
//!
//! ```rust,ignore
//! use devery_client::{Config, DeploymentRegistry, DeveryRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let registry =
//!         DeveryRegistry::connect(config.connection(), &DeploymentRegistry::bundled()).await?;
//!     let result = registry.check("0x0000000000000000000000000000000000000001".parse()?).await?;
//!     println!("{result:?}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use ethereum::constants::*;
pub use ethereum::{
    ConnectionConfig, ContractClient, DeploymentLookup, DeploymentRegistry, NodeSigner,
    SequentialNonceSigner, SignerOrProvider, TxSigner, WalletSigner,
};
pub use services::{DeveryAdmined, DeveryERC721, DeveryRegistry};
