//! Ethereum network constants.
//!
//! Contains chain IDs, public endpoints and contract names.

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// Local development node (Hardhat/Anvil) chain ID.
pub const LOCAL_DEV_CHAIN_ID: u64 = 31337;

/// Default network when nothing else is known (Ethereum Mainnet).
pub const DEFAULT_CHAIN_ID: u64 = ETHEREUM_MAINNET_CHAIN_ID;

// ============================================================================
// Public read-only endpoints
// ============================================================================

/// Public JSON-RPC endpoint for Ethereum Mainnet.
pub const MAINNET_PUBLIC_RPC: &str = "https://ethereum-rpc.publicnode.com";

/// Public JSON-RPC endpoint for Sepolia.
pub const SEPOLIA_PUBLIC_RPC: &str = "https://ethereum-sepolia-rpc.publicnode.com";

/// Default endpoint of a local development node.
pub const LOCAL_DEV_RPC: &str = "http://127.0.0.1:8545";

/// Public read-only endpoint for a network, if one is known.
pub fn default_rpc_url(network_id: u64) -> Option<&'static str> {
    match network_id {
        ETHEREUM_MAINNET_CHAIN_ID => Some(MAINNET_PUBLIC_RPC),
        SEPOLIA_CHAIN_ID => Some(SEPOLIA_PUBLIC_RPC),
        LOCAL_DEV_CHAIN_ID => Some(LOCAL_DEV_RPC),
        _ => None,
    }
}

// ============================================================================
// Contract names (as they appear in build artifacts)
// ============================================================================

/// Product/brand/app registry contract.
pub const DEVERY_REGISTRY: &str = "DeveryRegistry";

/// Product NFT contract.
pub const DEVERY_ERC721: &str = "DeveryERC721";
