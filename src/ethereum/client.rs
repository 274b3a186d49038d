//! Contract client resolution.
//!
//! Turns loose connection parameters into a provider, an optional signer and
//! a bound contract address.

use std::sync::Arc;

use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
};

use crate::{
    error::{AppError, Result},
    ethereum::{
        constants::{default_rpc_url, DEFAULT_CHAIN_ID},
        DeploymentLookup, NodeSigner, SequentialNonceSigner, TxSigner, WalletSigner,
    },
};

/// Type alias for the HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Create an HTTP provider. No network call is made.
pub fn connect_http(rpc_url: &str) -> Result<HttpProvider> {
    let url = rpc_url
        .parse()
        .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

    let provider = ProviderBuilder::new().connect_http(url).root().clone();

    Ok(provider)
}

/// How the client talks to the network.
#[derive(Clone, Default)]
pub enum SignerOrProvider {
    /// Nothing supplied: use a public read-only endpoint.
    #[default]
    None,
    /// Read-only provider at the given URL.
    Provider(String),
    /// Node with managed accounts at the given URL; signs through the node.
    NodeAccounts(String),
    /// Caller-supplied signer and the provider it is bound to.
    Signer(Arc<dyn TxSigner>, HttpProvider),
}

impl std::fmt::Debug for SignerOrProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Provider(url) => f.debug_tuple("Provider").field(url).finish(),
            Self::NodeAccounts(url) => f.debug_tuple("NodeAccounts").field(url).finish(),
            Self::Signer(signer, _) => f.debug_tuple("Signer").field(&signer.address()).finish(),
        }
    }
}

/// Connection parameters for a contract client.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Signer or provider handle.
    pub signer_or_provider: SignerOrProvider,
    /// Raw private key. Mutually exclusive with a signing handle.
    pub private_key: Option<String>,
    /// Account to sign with when the node manages several.
    pub account: Option<Address>,
    /// Explicit contract address; skips the deployment lookup.
    pub contract_address: Option<Address>,
    /// Explicit network ID; skips asking the node.
    pub network_id: Option<u64>,
    /// Wrap a signer built from `private_key` or node accounts in a
    /// [`SequentialNonceSigner`]. A [`SignerOrProvider::Signer`] is used as
    /// given; wrap it yourself and share that wrapper across clients.
    pub sequential_nonces: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            signer_or_provider: SignerOrProvider::None,
            private_key: None,
            account: None,
            contract_address: None,
            network_id: None,
            sequential_nonces: true,
        }
    }
}

impl ConnectionConfig {
    /// Same parameters bound to a different contract address.
    pub fn with_contract_address(mut self, address: Address) -> Self {
        self.contract_address = Some(address);
        self
    }

    /// Reject parameter combinations that cannot be resolved.
    pub fn validate(&self) -> Result<()> {
        let has_signer = matches!(
            self.signer_or_provider,
            SignerOrProvider::Signer(..) | SignerOrProvider::NodeAccounts(_)
        );

        if has_signer && self.private_key.is_some() {
            return Err(AppError::Config(
                "A signer and a private key are mutually exclusive".into(),
            ));
        }

        let node_accounts = matches!(self.signer_or_provider, SignerOrProvider::NodeAccounts(_));
        if self.account.is_some() && !node_accounts {
            return Err(AppError::Config(
                "An account override needs node-managed accounts".into(),
            ));
        }

        Ok(())
    }
}

/// A contract binding: provider, optional signer and deployed address.
///
/// Built once and never rebound. Façades hold it behind an `Arc`.
#[derive(Clone)]
pub struct ContractClient {
    provider: HttpProvider,
    signer: Option<Arc<dyn TxSigner>>,
    address: Address,
    network_id: u64,
    contract: String,
}

impl ContractClient {
    /// Resolve `config` into a client bound to `contract`.
    ///
    /// Configuration errors surface before any network call.
    pub async fn resolve(
        contract: &str,
        config: ConnectionConfig,
        deployments: &dyn DeploymentLookup,
    ) -> Result<Self> {
        config.validate()?;

        let (provider, signer) = match config.signer_or_provider {
            SignerOrProvider::None => {
                let network_id = config.network_id.unwrap_or(DEFAULT_CHAIN_ID);
                let address =
                    resolve_address(contract, config.contract_address, network_id, deployments)?;
                let url = default_rpc_url(network_id).ok_or_else(|| {
                    AppError::Config(format!("No public endpoint known for network {network_id}"))
                })?;
                let provider = connect_http(url)?;

                let signer = wallet_signer(config.private_key.as_deref(), &provider)?;
                let signer = wrap_signer(signer, config.sequential_nonces);

                tracing::info!(
                    contract,
                    address = %address,
                    network_id,
                    url,
                    "Contract client resolved on public endpoint"
                );

                return Ok(Self {
                    provider,
                    signer,
                    address,
                    network_id,
                    contract: contract.to_string(),
                });
            }
            SignerOrProvider::Provider(url) => {
                let provider = connect_http(&url)?;
                let signer = wallet_signer(config.private_key.as_deref(), &provider)?;
                (provider, wrap_signer(signer, config.sequential_nonces))
            }
            SignerOrProvider::NodeAccounts(url) => {
                let provider = connect_http(&url)?;
                let signer = NodeSigner::from_node(provider.clone(), config.account).await?;
                let signer = Some(Arc::new(signer) as Arc<dyn TxSigner>);
                (provider, wrap_signer(signer, config.sequential_nonces))
            }
            // The caller owns the supplied signer's decoration, nonce wrapper included.
            SignerOrProvider::Signer(signer, provider) => (provider, Some(signer)),
        };

        let network_id = match config.network_id {
            Some(id) => id,
            None => provider.get_chain_id().await?,
        };
        let address = resolve_address(contract, config.contract_address, network_id, deployments)?;

        tracing::info!(
            contract,
            address = %address,
            network_id,
            signer = ?signer.as_ref().map(|s| s.address()),
            "Contract client resolved"
        );

        Ok(Self { provider, signer, address, network_id, contract: contract.to_string() })
    }

    /// Bind directly to known parts, without any resolution.
    pub fn from_parts(
        contract: &str,
        provider: HttpProvider,
        signer: Option<Arc<dyn TxSigner>>,
        address: Address,
        network_id: u64,
    ) -> Self {
        Self { provider, signer, address, network_id, contract: contract.to_string() }
    }

    /// Another contract reachable through the same provider and signer.
    pub fn rebind(&self, contract: &str, address: Address) -> Self {
        Self {
            provider: self.provider.clone(),
            signer: self.signer.clone(),
            address,
            network_id: self.network_id,
            contract: contract.to_string(),
        }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// The active signer, if the client can write.
    pub fn signer(&self) -> Option<&Arc<dyn TxSigner>> {
        self.signer.as_ref()
    }

    /// Address of the active signer.
    pub fn signer_address(&self) -> Result<Address> {
        self.signer
            .as_ref()
            .map(|s| s.address())
            .ok_or_else(|| AppError::ReadOnly(format!("{} client has no signer", self.contract)))
    }

    /// Deployed contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Network the client is bound to.
    pub fn network_id(&self) -> u64 {
        self.network_id
    }

    /// Contract name the client was resolved for.
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Submit a transaction to the bound contract through the signer.
    pub async fn send(&self, tx: TransactionRequest) -> Result<TxHash> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            AppError::ReadOnly(format!("{} client cannot send transactions", self.contract))
        })?;

        let tx = tx.to(self.address).from(signer.address());
        let tx_hash = signer.send_transaction(tx).await?;

        tracing::info!(contract = %self.contract, tx_hash = %tx_hash, "Transaction submitted");

        Ok(tx_hash)
    }
}

impl std::fmt::Debug for ContractClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractClient")
            .field("contract", &self.contract)
            .field("address", &self.address)
            .field("network_id", &self.network_id)
            .field("signer", &self.signer.as_ref().map(|s| s.address()))
            .finish()
    }
}

fn resolve_address(
    contract: &str,
    explicit: Option<Address>,
    network_id: u64,
    deployments: &dyn DeploymentLookup,
) -> Result<Address> {
    match explicit {
        Some(address) => Ok(address),
        None => deployments.lookup(contract, network_id).ok_or_else(|| {
            AppError::UnresolvedAddress { contract: contract.to_string(), network_id }
        }),
    }
}

fn wallet_signer(
    private_key: Option<&str>,
    provider: &HttpProvider,
) -> Result<Option<Arc<dyn TxSigner>>> {
    private_key
        .map(|key| {
            let signer = WalletSigner::from_private_key(key, provider.clone())?;
            Ok(Arc::new(signer) as Arc<dyn TxSigner>)
        })
        .transpose()
}

fn wrap_signer(signer: Option<Arc<dyn TxSigner>>, sequential: bool) -> Option<Arc<dyn TxSigner>> {
    match signer {
        Some(signer) if sequential => {
            Some(Arc::new(SequentialNonceSigner::new(signer)) as Arc<dyn TxSigner>)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethereum::{constants::LOCAL_DEV_CHAIN_ID, DeploymentRegistry};
    use alloy::primitives::address;

    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const REGISTRY: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

    #[test]
    fn test_connect_http_invalid_url() {
        assert!(matches!(connect_http("not a url"), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_signer_and_private_key_conflict() {
        let signer = WalletSigner::from_private_key(
            TEST_PRIVATE_KEY,
            connect_http("http://127.0.0.1:1").unwrap(),
        )
        .unwrap();
        let config = ConnectionConfig {
            signer_or_provider: SignerOrProvider::Signer(
                Arc::new(signer),
                connect_http("http://127.0.0.1:1").unwrap(),
            ),
            private_key: Some(TEST_PRIVATE_KEY.into()),
            ..ConnectionConfig::default()
        };

        let result =
            ContractClient::resolve("DeveryRegistry", config, &DeploymentRegistry::empty()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_node_accounts_and_private_key_conflict() {
        let config = ConnectionConfig {
            signer_or_provider: SignerOrProvider::NodeAccounts("http://127.0.0.1:1".into()),
            private_key: Some(TEST_PRIVATE_KEY.into()),
            ..ConnectionConfig::default()
        };

        let result =
            ContractClient::resolve("DeveryRegistry", config, &DeploymentRegistry::empty()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_no_deployment_for_network() {
        let config = ConnectionConfig { network_id: Some(424242), ..ConnectionConfig::default() };

        let result =
            ContractClient::resolve("DeveryRegistry", config, &DeploymentRegistry::bundled()).await;
        match result {
            Err(AppError::UnresolvedAddress { network_id, .. }) => assert_eq!(network_id, 424242),
            other => panic!("Expected UnresolvedAddress, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_default_provider_uses_bundled_deployment() {
        let config =
            ConnectionConfig { network_id: Some(LOCAL_DEV_CHAIN_ID), ..ConnectionConfig::default() };

        let client = ContractClient::resolve("DeveryRegistry", config, &DeploymentRegistry::bundled())
            .await
            .unwrap();

        assert_eq!(client.address(), REGISTRY);
        assert_eq!(client.network_id(), LOCAL_DEV_CHAIN_ID);
        assert!(matches!(client.signer_address(), Err(AppError::ReadOnly(_))));
    }

    #[tokio::test]
    async fn test_private_key_with_explicit_network_needs_no_network_call() {
        let config = ConnectionConfig {
            signer_or_provider: SignerOrProvider::Provider("http://127.0.0.1:1".into()),
            private_key: Some(TEST_PRIVATE_KEY.into()),
            network_id: Some(7),
            contract_address: Some(REGISTRY),
            ..ConnectionConfig::default()
        };

        let client = ContractClient::resolve("DeveryRegistry", config, &DeploymentRegistry::empty())
            .await
            .unwrap();

        assert_eq!(client.address(), REGISTRY);
        assert_eq!(
            client.signer_address().unwrap(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[tokio::test]
    async fn test_account_override_requires_node_accounts() {
        let config = ConnectionConfig {
            account: Some(REGISTRY),
            network_id: Some(LOCAL_DEV_CHAIN_ID),
            ..ConnectionConfig::default()
        };

        let result =
            ContractClient::resolve("DeveryRegistry", config, &DeploymentRegistry::bundled()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_read_only_client_cannot_send() {
        let client = ContractClient::from_parts(
            "DeveryRegistry",
            connect_http("http://127.0.0.1:1").unwrap(),
            None,
            REGISTRY,
            LOCAL_DEV_CHAIN_ID,
        );

        let result = client.send(TransactionRequest::default()).await;
        assert!(matches!(result, Err(AppError::ReadOnly(_))));
    }

    #[test]
    fn test_rebind_keeps_signer_and_network() {
        let provider = connect_http("http://127.0.0.1:1").unwrap();
        let signer: Arc<dyn TxSigner> =
            Arc::new(WalletSigner::from_private_key(TEST_PRIVATE_KEY, provider.clone()).unwrap());
        let client =
            ContractClient::from_parts("DeveryRegistry", provider, Some(signer), REGISTRY, 5);

        let other = client.rebind("DeveryERC721", Address::ZERO);
        assert_eq!(other.network_id(), 5);
        assert_eq!(other.contract(), "DeveryERC721");
        assert_eq!(other.signer_address().unwrap(), client.signer_address().unwrap());
    }
}
