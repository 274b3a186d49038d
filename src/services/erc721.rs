//! Devery product NFT façade.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};

use crate::{
    error::{AppError, Result},
    ethereum::{
        constants::DEVERY_ERC721,
        contracts::erc721::IDeveryERC721::{self, IDeveryERC721Instance},
        ConnectionConfig, ContractClient, DeploymentLookup, EventCallback, EventSubscriptions,
        HttpProvider,
    },
};

/// Typed access to the Devery product NFT contract.
pub struct DeveryERC721 {
    client: Arc<ContractClient>,
    contract: IDeveryERC721Instance<HttpProvider>,
    events: EventSubscriptions,
}

impl DeveryERC721 {
    /// Create an NFT façade over a resolved client.
    pub fn new(client: Arc<ContractClient>) -> Self {
        let contract = IDeveryERC721::new(client.address(), client.provider().clone());
        Self { client, contract, events: EventSubscriptions::new() }
    }

    /// Resolve `config` and bind to the NFT deployment.
    pub async fn connect(
        config: ConnectionConfig,
        deployments: &dyn DeploymentLookup,
    ) -> Result<Self> {
        let client = ContractClient::resolve(DEVERY_ERC721, config, deployments).await?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Bind next to `client`, sharing its provider and signer.
    ///
    /// Use this instead of [`DeveryERC721::connect`] when the same account
    /// also sends through `client`, so both share one nonce sequence.
    pub fn sharing(client: &ContractClient, deployments: &dyn DeploymentLookup) -> Result<Self> {
        let address = deployments.lookup(DEVERY_ERC721, client.network_id()).ok_or_else(|| {
            AppError::UnresolvedAddress {
                contract: DEVERY_ERC721.to_string(),
                network_id: client.network_id(),
            }
        })?;
        Ok(Self::new(Arc::new(client.rebind(DEVERY_ERC721, address))))
    }

    /// The underlying contract client.
    pub fn client(&self) -> &Arc<ContractClient> {
        &self.client
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.client.address()
    }

    /// Active event listeners.
    pub fn events(&self) -> &EventSubscriptions {
        &self.events
    }

    /// Mint `quantity` tokens of `product`, paying `value` wei.
    pub async fn claim_product(
        &self,
        product: Address,
        quantity: U256,
        value: U256,
    ) -> Result<TxHash> {
        tracing::debug!(product = %product, quantity = %quantity, "Claiming product tokens");
        let call = self.contract.claimProduct(product, quantity).value(value);
        self.client.send(call.into_transaction_request()).await
    }

    /// Number of tokens held by `owner`.
    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.contract.balanceOf(owner).call().await?)
    }

    /// Holder of `token_id`.
    pub async fn owner_of(&self, token_id: U256) -> Result<Address> {
        Ok(self.contract.ownerOf(token_id).call().await?)
    }

    /// Product a token was minted for.
    pub async fn token_id_to_product(&self, token_id: U256) -> Result<Address> {
        Ok(self.contract.tokenIdToProduct(token_id).call().await?)
    }

    /// Products of every token held by `owner`.
    pub async fn get_products_by_owner(&self, owner: Address) -> Result<Vec<Address>> {
        Ok(self.contract.getProductsByOwner(owner).call().await?)
    }

    /// Minting cap of `product`, zero if uncapped.
    pub async fn total_allowed_products(&self, product: Address) -> Result<U256> {
        Ok(self.contract.totalAllowedProducts(product).call().await?)
    }

    /// Tokens minted so far for `product`.
    pub async fn total_minted_products(&self, product: Address) -> Result<U256> {
        Ok(self.contract.totalMintedProducts(product).call().await?)
    }

    /// Total number of tokens.
    pub async fn total_supply(&self) -> Result<U256> {
        Ok(self.contract.totalSupply().call().await?)
    }

    /// Cap the number of tokens mintable for `product`. Brand only.
    pub async fn set_maximum_mintable_quantity(
        &self,
        product: Address,
        quantity: U256,
    ) -> Result<TxHash> {
        let call = self.contract.setMaximumMintableQuantity(product, quantity);
        self.client.send(call.into_transaction_request()).await
    }

    /// Point the NFT contract at a registry. Owner only.
    pub async fn set_devery_registry_address(&self, registry: Address) -> Result<TxHash> {
        let call = self.contract.setDeveryRegistryAddress(registry);
        self.client.send(call.into_transaction_request()).await
    }

    /// Transfer `token_id` from `from` to `to`.
    pub async fn safe_transfer_from(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<TxHash> {
        let call = self.contract.safeTransferFrom(from, to, token_id);
        self.client.send(call.into_transaction_request()).await
    }

    /// Approve `approved` to transfer `token_id`.
    pub async fn approve(&self, approved: Address, token_id: U256) -> Result<TxHash> {
        self.client.send(self.contract.approve(approved, token_id).into_transaction_request()).await
    }

    /// Allow or revoke `operator` for all of the signer's tokens.
    pub async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<TxHash> {
        let call = self.contract.setApprovalForAll(operator, approved);
        self.client.send(call.into_transaction_request()).await
    }

    /// Listen for `Transfer`. `None` removes the listener.
    pub async fn on_transfer(
        &self,
        callback: Option<EventCallback<IDeveryERC721::Transfer>>,
    ) -> Result<()> {
        self.events.watch("Transfer", self.contract.Transfer_filter(), callback).await
    }

    /// Listen for `Approval`. `None` removes the listener.
    pub async fn on_approval(
        &self,
        callback: Option<EventCallback<IDeveryERC721::Approval>>,
    ) -> Result<()> {
        self.events.watch("Approval", self.contract.Approval_filter(), callback).await
    }

    /// Listen for `ApprovalForAll`. `None` removes the listener.
    pub async fn on_approval_for_all(
        &self,
        callback: Option<EventCallback<IDeveryERC721::ApprovalForAll>>,
    ) -> Result<()> {
        self.events.watch("ApprovalForAll", self.contract.ApprovalForAll_filter(), callback).await
    }
}

impl std::fmt::Debug for DeveryERC721 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeveryERC721")
            .field("client", &self.client)
            .field("events", &self.events)
            .finish()
    }
}
