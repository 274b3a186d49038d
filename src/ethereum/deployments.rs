//! Deployment address registry.
//!
//! Maps contract names and network IDs to deployed addresses, read from
//! Truffle-style build artifacts.

use std::collections::HashMap;
use std::path::Path;

use alloy::primitives::{address, Address};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::ethereum::constants::{DEVERY_ERC721, DEVERY_REGISTRY, LOCAL_DEV_CHAIN_ID};

/// Registry deployed by the first development account at nonce 0.
const LOCAL_DEV_REGISTRY: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

/// ERC721 deployed by the first development account at nonce 1.
const LOCAL_DEV_ERC721: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

// ============================================================================
// Artifact Types
// ============================================================================

/// Deployment entry inside an artifact's `networks` map.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactNetwork {
    /// Deployed address.
    pub address: String,
    /// Deployment transaction hash (optional).
    #[serde(rename = "transactionHash")]
    pub transaction_hash: Option<String>,
}

/// The parts of a build artifact this client reads.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildArtifact {
    /// Contract name (e.g., "DeveryRegistry").
    #[serde(rename = "contractName")]
    pub contract_name: String,
    /// Deployments keyed by network ID.
    #[serde(default)]
    pub networks: HashMap<String, ArtifactNetwork>,
}

// ============================================================================
// Deployment Lookup Trait
// ============================================================================

/// Lookup of deployed contract addresses.
pub trait DeploymentLookup: Send + Sync {
    /// Address of `contract` on `network_id`, if known.
    fn lookup(&self, contract: &str, network_id: u64) -> Option<Address>;
}

// ============================================================================
// Deployment Registry
// ============================================================================

/// In-memory map of `(contract, network) -> address`.
#[derive(Debug, Clone, Default)]
pub struct DeploymentRegistry {
    addresses: HashMap<(String, u64), Address>,
}

impl DeploymentRegistry {
    /// A registry with no deployments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Deployments of a fresh local development chain.
    pub fn bundled() -> Self {
        let mut registry = Self::empty();
        registry.insert(DEVERY_REGISTRY, LOCAL_DEV_CHAIN_ID, LOCAL_DEV_REGISTRY);
        registry.insert(DEVERY_ERC721, LOCAL_DEV_CHAIN_ID, LOCAL_DEV_ERC721);
        registry
    }

    /// Record a deployment, replacing any previous address.
    pub fn insert(&mut self, contract: &str, network_id: u64, address: Address) {
        self.addresses.insert((contract.to_string(), network_id), address);
    }

    /// Add every deployment listed in one artifact JSON document.
    ///
    /// Nothing is added unless every entry parses.
    pub fn load_artifact_json(&mut self, json: &str) -> Result<usize> {
        let artifact: BuildArtifact = serde_json::from_str(json)?;

        let entries = artifact
            .networks
            .iter()
            .map(|(network, entry)| {
                let network_id: u64 = network.parse().map_err(|_| {
                    AppError::Parse(format!(
                        "{}: invalid network id {network:?}",
                        artifact.contract_name
                    ))
                })?;

                let address: Address = entry.address.parse().map_err(|_| {
                    AppError::Parse(format!(
                        "{}: invalid address {:?} for network {network_id}",
                        artifact.contract_name, entry.address
                    ))
                })?;

                Ok::<_, AppError>((network_id, address))
            })
            .collect::<Result<Vec<_>>>()?;

        let loaded = entries.len();
        for (network_id, address) in entries {
            self.insert(&artifact.contract_name, network_id, address);
        }

        debug!(contract = %artifact.contract_name, loaded, "Loaded deployment artifact");

        Ok(loaded)
    }

    /// Add deployments from every `*.json` artifact in `dir`.
    ///
    /// Files that are not artifacts are skipped with a warning.
    pub fn load_artifacts_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut loaded = 0;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let json = std::fs::read_to_string(&path)?;
            match self.load_artifact_json(&json) {
                Ok(count) => loaded += count,
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping artifact"),
            }
        }

        Ok(loaded)
    }

    /// Number of known deployments.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl DeploymentLookup for DeploymentRegistry {
    fn lookup(&self, contract: &str, network_id: u64) -> Option<Address> {
        self.addresses.get(&(contract.to_string(), network_id)).copied()
    }
}
