//! Transaction signer abstraction.
//!
//! [`TxSigner`] is the seam between the contract façades and whatever
//! authorizes transactions: a local private key ([`WalletSigner`]), an account
//! managed by the node ([`NodeSigner`]), or a decorator such as
//! [`SequentialNonceSigner`].
//!
//! [`WalletSigner`]: crate::ethereum::WalletSigner
//! [`SequentialNonceSigner`]: crate::ethereum::SequentialNonceSigner

use std::sync::Arc;

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, Bytes, Signature, TxHash},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    ethereum::HttpProvider,
};

/// An entity capable of authorizing and submitting transactions for one account.
#[async_trait]
pub trait TxSigner: Send + Sync {
    /// Address of the account this signer acts for.
    fn address(&self) -> Address;

    /// Sign an arbitrary message (EIP-191 personal message).
    async fn sign_message(&self, message: &[u8]) -> Result<Signature>;

    /// Sign a transaction, returning the EIP-2718 encoded envelope.
    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes>;

    /// Sign and broadcast a transaction.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash>;

    /// Transaction count of the account at the given block tag.
    async fn get_transaction_count(&self, tag: BlockNumberOrTag) -> Result<u64>;

    /// Rebind the same account to a different provider.
    fn connect(&self, provider: HttpProvider) -> Arc<dyn TxSigner>;
}

#[async_trait]
impl TxSigner for Arc<dyn TxSigner> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        (**self).sign_message(message).await
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes> {
        (**self).sign_transaction(tx).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        (**self).send_transaction(tx).await
    }

    async fn get_transaction_count(&self, tag: BlockNumberOrTag) -> Result<u64> {
        (**self).get_transaction_count(tag).await
    }

    fn connect(&self, provider: HttpProvider) -> Arc<dyn TxSigner> {
        (**self).connect(provider)
    }
}

/// Signer for an account whose key is held by the node (`eth_accounts`).
#[derive(Clone)]
pub struct NodeSigner {
    provider: HttpProvider,
    address: Address,
}

impl NodeSigner {
    /// Bind to a known node-managed account.
    pub fn new(provider: HttpProvider, address: Address) -> Self {
        Self { provider, address }
    }

    /// Bind to `account` if given, otherwise to the node's first account.
    pub async fn from_node(provider: HttpProvider, account: Option<Address>) -> Result<Self> {
        let address = match account {
            Some(address) => address,
            None => {
                let accounts = provider.get_accounts().await?;
                *accounts.first().ok_or_else(|| {
                    AppError::Config("Node does not expose any managed accounts".into())
                })?
            }
        };

        tracing::info!(address = %address, "Using node-managed account");

        Ok(Self::new(provider, address))
    }
}

#[async_trait]
impl TxSigner for NodeSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        let raw: Bytes = self
            .provider
            .raw_request("eth_sign".into(), (self.address, Bytes::copy_from_slice(message)))
            .await?;
        Signature::try_from(raw.as_ref()).map_err(|e| AppError::Wallet(e.to_string()))
    }

    async fn sign_transaction(&self, _tx: TransactionRequest) -> Result<Bytes> {
        Err(AppError::Wallet("Node-managed accounts cannot sign transactions offline".into()))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let pending = self.provider.send_transaction(tx.from(self.address)).await?;
        Ok(*pending.tx_hash())
    }

    async fn get_transaction_count(&self, tag: BlockNumberOrTag) -> Result<u64> {
        let count =
            self.provider.get_transaction_count(self.address).block_id(tag.into()).await?;
        Ok(count)
    }

    fn connect(&self, provider: HttpProvider) -> Arc<dyn TxSigner> {
        Arc::new(Self::new(provider, self.address))
    }
}

impl std::fmt::Debug for NodeSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeSigner").field("address", &self.address).finish()
    }
}
