//! Devery registry façade.

use std::sync::Arc;

use alloy::{
    primitives::{Address, TxHash, B256, U256},
    providers::Provider,
};
use futures::future::try_join_all;

use crate::{
    error::{AppError, Result},
    ethereum::{
        constants::DEVERY_REGISTRY,
        contracts::registry::IDeveryRegistry::{self, IDeveryRegistryInstance},
        ConnectionConfig, ContractClient, DeploymentLookup, EventCallback, EventSubscriptions,
        HttpProvider,
    },
    services::DeveryAdmined,
    types::{AppInfo, BrandData, BrandInfo, CheckResult, ProductInfo, ProductParams, RegistrySummary},
};

/// Typed access to the Devery registry of apps, brands and products.
pub struct DeveryRegistry {
    client: Arc<ContractClient>,
    contract: IDeveryRegistryInstance<HttpProvider>,
    events: EventSubscriptions,
}

impl DeveryRegistry {
    /// Create a registry façade over a resolved client.
    pub fn new(client: Arc<ContractClient>) -> Self {
        let contract = IDeveryRegistry::new(client.address(), client.provider().clone());
        Self { client, contract, events: EventSubscriptions::new() }
    }

    /// Resolve `config` and bind to the registry deployment.
    ///
    /// The bundled deployments only cover the local development chain.
    /// With the default network (mainnet) the lookup fails with
    /// [`AppError::UnresolvedAddress`] unless mainnet artifacts were loaded
    /// (see `DEVERY_ARTIFACTS_DIR`) or `contract_address` is set.
    pub async fn connect(
        config: ConnectionConfig,
        deployments: &dyn DeploymentLookup,
    ) -> Result<Self> {
        let client = ContractClient::resolve(DEVERY_REGISTRY, config, deployments).await?;
        Ok(Self::new(Arc::new(client)))
    }

    /// The underlying contract client.
    pub fn client(&self) -> &Arc<ContractClient> {
        &self.client
    }

    /// Registry address.
    pub fn address(&self) -> Address {
        self.client.address()
    }

    /// Owner/admin entry points of the same contract.
    pub fn admined(&self) -> DeveryAdmined {
        DeveryAdmined::new(self.client.clone())
    }

    /// Active event listeners.
    pub fn events(&self) -> &EventSubscriptions {
        &self.events
    }

    // ------------------------------------------------------------------------
    // Fees
    // ------------------------------------------------------------------------

    /// Token used to pay marking fees.
    pub async fn token(&self) -> Result<Address> {
        Ok(self.contract.token().call().await?)
    }

    /// Account receiving the registry's own fee.
    pub async fn fee_account(&self) -> Result<Address> {
        Ok(self.contract.feeAccount().call().await?)
    }

    /// Registry fee charged per mark.
    pub async fn fee(&self) -> Result<U256> {
        Ok(self.contract.fee().call().await?)
    }

    /// Set the fee token. Owner only.
    pub async fn set_token(&self, token: Address) -> Result<TxHash> {
        self.client.send(self.contract.setToken(token).into_transaction_request()).await
    }

    /// Set the registry fee account. Owner only.
    pub async fn set_fee_account(&self, fee_account: Address) -> Result<TxHash> {
        self.client.send(self.contract.setFeeAccount(fee_account).into_transaction_request()).await
    }

    /// Set the registry fee. Owner only.
    pub async fn set_fee(&self, fee: U256) -> Result<TxHash> {
        self.client.send(self.contract.setFee(fee).into_transaction_request()).await
    }

    // ------------------------------------------------------------------------
    // Apps
    // ------------------------------------------------------------------------

    /// Register the signer's account as an app.
    pub async fn add_app(&self, app_name: &str, fee_account: Address, fee: U256) -> Result<TxHash> {
        tracing::debug!(app_name, fee_account = %fee_account, fee = %fee, "Adding app");
        let call = self.contract.addApp(app_name.to_string(), fee_account, fee);
        self.client.send(call.into_transaction_request()).await
    }

    /// Update the signer's app.
    pub async fn update_app(
        &self,
        app_name: &str,
        fee_account: Address,
        fee: U256,
        active: bool,
    ) -> Result<TxHash> {
        let call = self.contract.updateApp(app_name.to_string(), fee_account, fee, active);
        self.client.send(call.into_transaction_request()).await
    }

    /// App registered by `app_account`.
    pub async fn get_app(&self, app_account: Address) -> Result<AppInfo> {
        Ok(self.contract.getApp(app_account).call().await?.into())
    }

    /// Every registered app account.
    pub async fn get_app_accounts(&self) -> Result<Vec<Address>> {
        let count = self.contract.appAccountsLength().call().await?;
        try_join_all(indices(count)?.map(|i| async move {
            Ok::<_, AppError>(self.contract.appAccounts(i).call().await?)
        }))
        .await
    }

    // ------------------------------------------------------------------------
    // Brands
    // ------------------------------------------------------------------------

    /// Register a brand under the signer's app.
    pub async fn add_brand(&self, brand_account: Address, brand_name: &str) -> Result<TxHash> {
        let call = self.contract.addBrand(brand_account, brand_name.to_string());
        self.client.send(call.into_transaction_request()).await
    }

    /// Update a brand of the signer's app.
    pub async fn update_brand(
        &self,
        brand_account: Address,
        brand_name: &str,
        active: bool,
    ) -> Result<TxHash> {
        let call = self.contract.updateBrand(brand_account, brand_name.to_string(), active);
        self.client.send(call.into_transaction_request()).await
    }

    /// Brand registered for `brand_account`.
    pub async fn get_brand(&self, brand_account: Address) -> Result<BrandInfo> {
        Ok(self.contract.getBrand(brand_account).call().await?.into())
    }

    /// Fee routing of `brand_account`.
    pub async fn get_brand_data(&self, brand_account: Address) -> Result<BrandData> {
        Ok(self.contract.getBrandData(brand_account).call().await?.into())
    }

    /// Every registered brand account.
    pub async fn get_brand_accounts(&self) -> Result<Vec<Address>> {
        let count = self.contract.brandAccountsLength().call().await?;
        try_join_all(indices(count)?.map(|i| async move {
            Ok::<_, AppError>(self.contract.brandAccounts(i).call().await?)
        }))
        .await
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    /// Register a product under the signer's brand.
    pub async fn add_product(&self, product: &ProductParams) -> Result<TxHash> {
        let call = self.contract.addProduct(
            product.product_account,
            product.description.clone(),
            product.details.clone(),
            U256::from(product.year),
            product.origin.clone(),
        );
        self.client.send(call.into_transaction_request()).await
    }

    /// Update a product of the signer's brand.
    pub async fn update_product(&self, product: &ProductParams, active: bool) -> Result<TxHash> {
        let call = self.contract.updateProduct(
            product.product_account,
            product.description.clone(),
            product.details.clone(),
            U256::from(product.year),
            product.origin.clone(),
            active,
        );
        self.client.send(call.into_transaction_request()).await
    }

    /// Product registered for `product_account`.
    pub async fn get_product(&self, product_account: Address) -> Result<ProductInfo> {
        Ok(self.contract.getProduct(product_account).call().await?.into())
    }

    /// Every registered product account.
    pub async fn get_product_accounts(&self) -> Result<Vec<Address>> {
        let count = self.contract.productAccountsLength().call().await?;
        try_join_all(indices(count)?.map(|i| async move {
            Ok::<_, AppError>(self.contract.productAccounts(i).call().await?)
        }))
        .await
    }

    // ------------------------------------------------------------------------
    // Marking
    // ------------------------------------------------------------------------

    /// Allow or revoke `marker` marking items for the signer's brand.
    pub async fn permission_marker(&self, marker: Address, permission: bool) -> Result<TxHash> {
        let call = self.contract.permissionMarker(marker, permission);
        self.client.send(call.into_transaction_request()).await
    }

    /// Hash under which `item` is marked.
    pub async fn address_hash(&self, item: Address) -> Result<B256> {
        Ok(self.contract.addressHash(item).call().await?)
    }

    /// Mark an item hash as belonging to `product_account`.
    pub async fn mark(&self, product_account: Address, item_hash: B256) -> Result<TxHash> {
        tracing::debug!(product = %product_account, item_hash = %item_hash, "Marking item");
        let call = self.contract.mark(product_account, item_hash);
        self.client.send(call.into_transaction_request()).await
    }

    /// Hash `item` and mark it for `product_account`.
    pub async fn mark_item(&self, product_account: Address, item: Address) -> Result<TxHash> {
        let item_hash = self.address_hash(item).await?;
        self.mark(product_account, item_hash).await
    }

    /// Product, brand and app an item was marked for.
    pub async fn check(&self, item: Address) -> Result<CheckResult> {
        Ok(self.contract.check(item).call().await?.into())
    }

    /// Record counts and fee settings.
    pub async fn summary(&self) -> Result<RegistrySummary> {
        let (apps, brands, products, token, fee_account, fee) = tokio::try_join!(
            async { Ok::<_, AppError>(self.contract.appAccountsLength().call().await?) },
            async { Ok::<_, AppError>(self.contract.brandAccountsLength().call().await?) },
            async { Ok::<_, AppError>(self.contract.productAccountsLength().call().await?) },
            self.token(),
            self.fee_account(),
            self.fee(),
        )?;

        Ok(RegistrySummary {
            address: self.address(),
            network_id: self.client.network_id(),
            apps,
            brands,
            products,
            token,
            fee_account,
            fee,
        })
    }

    /// Current block number seen by the registry's provider.
    pub async fn block_number(&self) -> Result<u64> {
        Ok(self.client.provider().get_block_number().await?)
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Listen for `AppAdded`. `None` removes the listener.
    pub async fn on_app_added(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::AppAdded>>,
    ) -> Result<()> {
        self.events.watch("AppAdded", self.contract.AppAdded_filter(), callback).await
    }

    /// Listen for `AppUpdated`. `None` removes the listener.
    pub async fn on_app_updated(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::AppUpdated>>,
    ) -> Result<()> {
        self.events.watch("AppUpdated", self.contract.AppUpdated_filter(), callback).await
    }

    /// Listen for `BrandAdded`. `None` removes the listener.
    pub async fn on_brand_added(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::BrandAdded>>,
    ) -> Result<()> {
        self.events.watch("BrandAdded", self.contract.BrandAdded_filter(), callback).await
    }

    /// Listen for `BrandUpdated`. `None` removes the listener.
    pub async fn on_brand_updated(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::BrandUpdated>>,
    ) -> Result<()> {
        self.events.watch("BrandUpdated", self.contract.BrandUpdated_filter(), callback).await
    }

    /// Listen for `ProductAdded`. `None` removes the listener.
    pub async fn on_product_added(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::ProductAdded>>,
    ) -> Result<()> {
        self.events.watch("ProductAdded", self.contract.ProductAdded_filter(), callback).await
    }

    /// Listen for `ProductUpdated`. `None` removes the listener.
    pub async fn on_product_updated(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::ProductUpdated>>,
    ) -> Result<()> {
        self.events.watch("ProductUpdated", self.contract.ProductUpdated_filter(), callback).await
    }

    /// Listen for `Permissioned`. `None` removes the listener.
    pub async fn on_permissioned(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::Permissioned>>,
    ) -> Result<()> {
        self.events.watch("Permissioned", self.contract.Permissioned_filter(), callback).await
    }

    /// Listen for `Marked`. `None` removes the listener.
    pub async fn on_marked(
        &self,
        callback: Option<EventCallback<IDeveryRegistry::Marked>>,
    ) -> Result<()> {
        self.events.watch("Marked", self.contract.Marked_filter(), callback).await
    }
}

impl std::fmt::Debug for DeveryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeveryRegistry")
            .field("client", &self.client)
            .field("events", &self.events)
            .finish()
    }
}

/// Indices `0..count` of an on-chain array.
fn indices(count: U256) -> Result<impl Iterator<Item = U256>> {
    let count: u64 = count.try_into().map_err(|_| {
        AppError::Decode(format!("array length {count} exceeds u64 range"))
    })?;
    Ok((0..count).map(U256::from))
}
