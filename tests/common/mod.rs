//! Common utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{address, Address, Bytes, Signature, TxHash},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use devery_client::{
    ethereum::HttpProvider, AppError, Config, DeploymentRegistry, DeveryRegistry, Result,
    TxSigner,
};

/// Account used by the in-memory signer.
pub const MOCK_ACCOUNT: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

/// In-memory signer: fixed pending count, records every nonce it sends.
#[derive(Clone, Default)]
pub struct RecordingSigner {
    pub pending: u64,
    pub fetch_delay: Duration,
    pub fetches: Arc<AtomicU64>,
    pub sent: Arc<Mutex<Vec<u64>>>,
}

impl RecordingSigner {
    pub fn new(pending: u64) -> Self {
        Self { pending, fetch_delay: Duration::from_millis(25), ..Default::default() }
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn sent_nonces(&self) -> Vec<u64> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl TxSigner for RecordingSigner {
    fn address(&self) -> Address {
        MOCK_ACCOUNT
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<Signature> {
        Err(AppError::Wallet("RecordingSigner does not sign messages".into()))
    }

    async fn sign_transaction(&self, _tx: TransactionRequest) -> Result<Bytes> {
        Err(AppError::Wallet("RecordingSigner does not sign transactions".into()))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let nonce = tx.nonce.ok_or_else(|| AppError::Wallet("nonce not assigned".into()))?;
        // Simulate network latency between assignment and broadcast.
        tokio::time::sleep(Duration::from_millis(nonce % 5)).await;
        self.sent.lock().unwrap().push(nonce);
        Ok(TxHash::with_last_byte(nonce as u8))
    }

    async fn get_transaction_count(&self, tag: BlockNumberOrTag) -> Result<u64> {
        if tag == BlockNumberOrTag::Pending {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.fetch_delay).await;
        }
        Ok(self.pending)
    }

    fn connect(&self, _provider: HttpProvider) -> Arc<dyn TxSigner> {
        Arc::new(self.clone())
    }
}

/// Helper to create a registry bound to a live node from environment variables.
pub async fn create_test_registry() -> Option<DeveryRegistry> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().ok()?;
    if config.rpc_url.is_none() || config.private_key.is_none() {
        return None;
    }

    let mut deployments = DeploymentRegistry::bundled();
    if let Some(dir) = &config.artifacts_dir {
        deployments.load_artifacts_dir(dir).ok()?;
    }

    DeveryRegistry::connect(config.connection(), &deployments).await.ok()
}

/// Skip test if the registry cannot be created (missing env vars).
#[macro_export]
macro_rules! skip_if_no_client {
    () => {
        match common::create_test_registry().await {
            Some(registry) => registry,
            None => {
                eprintln!("Skipping test: DEVERY_RPC_URL or DEVERY_PRIVATE_KEY not set");
                return;
            }
        }
    };
}
