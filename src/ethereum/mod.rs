//! Ethereum interaction module.
//!
//! Contains the contract client, signers, nonce management, deployment
//! lookup, event subscriptions and contract bindings.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod deployments;
pub mod events;
pub mod nonce;
pub mod signer;
pub mod wallet;

pub use client::{connect_http, ConnectionConfig, ContractClient, HttpProvider, SignerOrProvider};
pub use deployments::{DeploymentLookup, DeploymentRegistry};
pub use events::{EventCallback, EventSubscriptions};
pub use nonce::SequentialNonceSigner;
pub use signer::{NodeSigner, TxSigner};
pub use wallet::WalletSigner;
