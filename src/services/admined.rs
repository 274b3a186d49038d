//! Ownership and admin façade.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash};

use crate::{
    error::Result,
    ethereum::{
        contracts::admined::IDeveryAdmined::{self, IDeveryAdminedInstance},
        ContractClient, EventCallback, EventSubscriptions, HttpProvider,
    },
};

/// Owner/admin management of a Devery contract.
pub struct DeveryAdmined {
    client: Arc<ContractClient>,
    contract: IDeveryAdminedInstance<HttpProvider>,
    events: EventSubscriptions,
}

impl DeveryAdmined {
    /// Create an admin façade over a resolved client.
    pub fn new(client: Arc<ContractClient>) -> Self {
        let contract = IDeveryAdmined::new(client.address(), client.provider().clone());
        Self { client, contract, events: EventSubscriptions::new() }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.client.address()
    }

    /// Active event listeners.
    pub fn events(&self) -> &EventSubscriptions {
        &self.events
    }

    /// Current owner.
    pub async fn owner(&self) -> Result<Address> {
        Ok(self.contract.owner().call().await?)
    }

    /// Pending owner, zero if no transfer is in progress.
    pub async fn new_owner(&self) -> Result<Address> {
        Ok(self.contract.newOwner().call().await?)
    }

    /// Start handing ownership to `new_owner`. Owner only.
    pub async fn transfer_ownership(&self, new_owner: Address) -> Result<TxHash> {
        tracing::info!(new_owner = %new_owner, "Transferring ownership");
        self.client.send(self.contract.transferOwnership(new_owner).into_transaction_request()).await
    }

    /// Complete a pending transfer. Pending owner only.
    pub async fn accept_ownership(&self) -> Result<TxHash> {
        self.client.send(self.contract.acceptOwnership().into_transaction_request()).await
    }

    /// Whether `addr` is an admin.
    pub async fn is_admin(&self, addr: Address) -> Result<bool> {
        Ok(self.contract.isAdmin(addr).call().await?)
    }

    /// Grant admin rights. Owner only.
    pub async fn add_admin(&self, addr: Address) -> Result<TxHash> {
        self.client.send(self.contract.addAdmin(addr).into_transaction_request()).await
    }

    /// Revoke admin rights. Owner only.
    pub async fn remove_admin(&self, addr: Address) -> Result<TxHash> {
        self.client.send(self.contract.removeAdmin(addr).into_transaction_request()).await
    }

    /// Listen for `OwnershipTransferred`. `None` removes the listener.
    pub async fn on_ownership_transferred(
        &self,
        callback: Option<EventCallback<IDeveryAdmined::OwnershipTransferred>>,
    ) -> Result<()> {
        self.events
            .watch("OwnershipTransferred", self.contract.OwnershipTransferred_filter(), callback)
            .await
    }

    /// Listen for `AdminAdded`. `None` removes the listener.
    pub async fn on_admin_added(
        &self,
        callback: Option<EventCallback<IDeveryAdmined::AdminAdded>>,
    ) -> Result<()> {
        self.events.watch("AdminAdded", self.contract.AdminAdded_filter(), callback).await
    }

    /// Listen for `AdminRemoved`. `None` removes the listener.
    pub async fn on_admin_removed(
        &self,
        callback: Option<EventCallback<IDeveryAdmined::AdminRemoved>>,
    ) -> Result<()> {
        self.events.watch("AdminRemoved", self.contract.AdminRemoved_filter(), callback).await
    }
}

impl std::fmt::Debug for DeveryAdmined {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeveryAdmined").field("address", &self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        ethereum::{connect_http, constants::DEVERY_REGISTRY},
    };

    #[tokio::test]
    async fn test_read_only_admined_rejects_writes() {
        let client = ContractClient::from_parts(
            DEVERY_REGISTRY,
            connect_http("http://127.0.0.1:1").unwrap(),
            None,
            Address::ZERO,
            1,
        );
        let admined = DeveryAdmined::new(Arc::new(client));

        let result = admined.add_admin(Address::ZERO).await;
        assert!(matches!(result, Err(AppError::ReadOnly(_))));
        let result = admined.accept_ownership().await;
        assert!(matches!(result, Err(AppError::ReadOnly(_))));
    }
}
