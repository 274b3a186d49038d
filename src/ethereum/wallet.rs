//! Local private-key signer.

use std::sync::Arc;

use alloy::{
    eips::{eip2718::Encodable2718, BlockNumberOrTag},
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, Signature, TxHash},
    providers::Provider,
    rpc::types::TransactionRequest,
    signers::{local::PrivateKeySigner, Signer},
};
use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::{
    error::{AppError, Result},
    ethereum::{HttpProvider, TxSigner},
};

/// Signer holding a private key, bound to a provider for broadcasting.
#[derive(Clone)]
pub struct WalletSigner {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
    /// Provider used for filling and broadcasting.
    provider: HttpProvider,
    /// Lazily fetched chain ID of `provider`.
    chain_id: Arc<OnceCell<u64>>,
}

impl WalletSigner {
    /// Create a signer from a private key string.
    pub fn from_private_key(private_key: &str, provider: HttpProvider) -> Result<Self> {
        // Remove 0x prefix if present
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);

        let signer: PrivateKeySigner =
            key.parse().map_err(|e: alloy::signers::local::LocalSignerError| {
                AppError::Wallet(e.to_string())
            })?;

        let address = signer.address();

        tracing::info!(address = %address, "Wallet signer initialized");

        Ok(Self { signer, address, provider, chain_id: Arc::new(OnceCell::new()) })
    }

    /// Chain ID of the bound provider (fetched on first call).
    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                Ok(chain_id)
            })
            .await
            .copied()
    }

    /// Fill the fields a raw transaction needs but the caller left unset.
    async fn fill(&self, mut tx: TransactionRequest) -> Result<TransactionRequest> {
        tx.from = Some(self.address);

        if tx.chain_id.is_none() {
            tx.chain_id = Some(self.chain_id().await?);
        }

        if tx.nonce.is_none() {
            tx.nonce = Some(self.get_transaction_count(BlockNumberOrTag::Pending).await?);
        }

        if tx.gas.is_none() {
            tx.gas = Some(self.provider.estimate_gas(tx.clone()).await?);
        }

        if tx.gas_price.is_none() && tx.max_fee_per_gas.is_none() {
            let fees = self.provider.estimate_eip1559_fees().await?;
            tx.max_fee_per_gas = Some(fees.max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(fees.max_priority_fee_per_gas);
        }

        Ok(tx)
    }
}

#[async_trait]
impl TxSigner for WalletSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        Ok(self.signer.sign_message(message).await?)
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes> {
        let tx = self.fill(tx).await?;
        let wallet = EthereumWallet::from(self.signer.clone());
        let envelope = tx.build(&wallet).await.map_err(|e| AppError::Wallet(e.to_string()))?;
        Ok(envelope.encoded_2718().into())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let raw = self.sign_transaction(tx).await?;
        let pending = self.provider.send_raw_transaction(&raw).await?;
        let tx_hash = *pending.tx_hash();

        tracing::debug!(address = %self.address, tx_hash = %tx_hash, "Raw transaction broadcast");

        Ok(tx_hash)
    }

    async fn get_transaction_count(&self, tag: BlockNumberOrTag) -> Result<u64> {
        let count =
            self.provider.get_transaction_count(self.address).block_id(tag.into()).await?;
        Ok(count)
    }

    fn connect(&self, provider: HttpProvider) -> Arc<dyn TxSigner> {
        Arc::new(Self {
            signer: self.signer.clone(),
            address: self.address,
            provider,
            chain_id: Arc::new(OnceCell::new()),
        })
    }
}

impl std::fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSigner").field("address", &self.address).finish()
    }
}
