//! Sequential nonce assignment for concurrent submission.
//!
//! [`SequentialNonceSigner`] decorates a [`TxSigner`] so that every
//! transaction sent through it gets a unique, increasing nonce, even when
//! several sends are in flight before any of them confirms.
//!
//! The nonce state is `base + delta`: `base` is the pending transaction count
//! fetched from the network once (and shared by concurrent first callers),
//! `delta` counts the nonces handed out locally since the last reset.
//!
//! One wrapper per logical sender per process: two wrappers over the same
//! account do not see each other's allocations.

use std::sync::Arc;

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, Bytes, Signature, TxHash},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};

use crate::{
    error::{AppError, Result},
    ethereum::{HttpProvider, TxSigner},
};

/// Nonce bookkeeping owned by one [`SequentialNonceSigner`].
#[derive(Debug, Default)]
struct NonceState {
    /// Pending count from the network. Replaced wholesale on reset so that
    /// fetches already in flight cannot overwrite an explicit value.
    base: Arc<OnceCell<u64>>,
    /// Nonces issued locally since the last reset.
    delta: u64,
}

/// Signer decorator that hands out gap-free sequential nonces.
pub struct SequentialNonceSigner<S> {
    inner: S,
    state: Mutex<NonceState>,
}

impl<S: TxSigner> SequentialNonceSigner<S> {
    /// Wrap `inner`. The base nonce is fetched lazily on first use.
    pub fn new(inner: S) -> Self {
        Self { inner, state: Mutex::new(NonceState::default()) }
    }

    /// The wrapped signer.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Whether a base nonce has been fetched or set.
    pub async fn is_primed(&self) -> bool {
        self.state.lock().await.base.initialized()
    }

    /// Rebind the wrapped signer to another provider.
    ///
    /// The returned wrapper starts with fresh nonce state.
    pub fn connect(&self, provider: HttpProvider) -> SequentialNonceSigner<Arc<dyn TxSigner>> {
        SequentialNonceSigner::new(self.inner.connect(provider))
    }

    /// Replace the base nonce with `count` and reset the local delta.
    pub async fn set_transaction_count(&self, count: u64) {
        let mut state = self.state.lock().await;
        state.base = Arc::new(OnceCell::new_with(Some(count)));
        state.delta = 0;

        tracing::debug!(address = %self.inner.address(), nonce = count, "Transaction count reset");
    }

    /// Reserve `count` nonces without sending.
    pub async fn increment_transaction_count(&self, count: u64) -> Result<()> {
        let mut state = self.state.lock().await;
        state.delta = state.delta.checked_add(count).ok_or_else(|| {
            AppError::NonceOverflow(format!("cannot reserve {count} more nonces"))
        })?;
        Ok(())
    }

    /// Next nonce this wrapper would assign (`base + delta`).
    pub async fn pending_transaction_count(&self) -> Result<u64> {
        self.allocate(0).await
    }

    /// Read `base + delta` and add `reserve` to the delta as one step.
    ///
    /// The base fetch happens outside the lock; concurrent callers share it
    /// through the `OnceCell`. If a reset replaced the cell meanwhile, the
    /// read is retried against the new base.
    async fn allocate(&self, reserve: u64) -> Result<u64> {
        loop {
            let cell = Arc::clone(&self.state.lock().await.base);

            let base = *cell
                .get_or_try_init(|| async {
                    let count = self.inner.get_transaction_count(BlockNumberOrTag::Pending).await?;
                    tracing::info!(
                        address = %self.inner.address(),
                        nonce = count,
                        "Base nonce fetched"
                    );
                    Ok::<_, AppError>(count)
                })
                .await?;

            let mut state = self.state.lock().await;
            if !Arc::ptr_eq(&state.base, &cell) {
                continue;
            }

            let delta = state.delta;
            let nonce = base
                .checked_add(delta)
                .filter(|nonce| nonce.checked_add(reserve).is_some())
                .ok_or_else(|| AppError::NonceOverflow(format!("base {base} + delta {delta}")))?;
            state.delta = delta + reserve;
            return Ok(nonce);
        }
    }
}

#[async_trait]
impl<S: TxSigner> TxSigner for SequentialNonceSigner<S> {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.inner.sign_message(message).await
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes> {
        self.inner.sign_transaction(tx).await
    }

    async fn send_transaction(&self, mut tx: TransactionRequest) -> Result<TxHash> {
        match tx.nonce {
            None => {
                let nonce = self.allocate(1).await?;
                tx.nonce = Some(nonce);
                tracing::debug!(address = %self.inner.address(), nonce, "Nonce allocated");
            }
            Some(nonce) => {
                // Caller-supplied nonce is authoritative and counts as issued.
                let mut state = self.state.lock().await;
                state.base = Arc::new(OnceCell::new_with(Some(nonce)));
                state.delta = 1;
                tracing::debug!(address = %self.inner.address(), nonce, "Explicit nonce adopted");
            }
        }

        let nonce = tx.nonce;
        // A failed send keeps its nonce reserved: it may have reached the network.
        self.inner.send_transaction(tx).await.inspect_err(|e| {
            tracing::warn!(
                address = %self.inner.address(),
                nonce = ?nonce,
                error = %e,
                "Send failed, nonce stays reserved"
            );
        })
    }

    async fn get_transaction_count(&self, tag: BlockNumberOrTag) -> Result<u64> {
        match tag {
            BlockNumberOrTag::Pending => self.pending_transaction_count().await,
            other => self.inner.get_transaction_count(other).await,
        }
    }

    fn connect(&self, provider: HttpProvider) -> Arc<dyn TxSigner> {
        Arc::new(SequentialNonceSigner::connect(self, provider))
    }
}

impl<S: TxSigner> std::fmt::Debug for SequentialNonceSigner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialNonceSigner").field("address", &self.inner.address()).finish()
    }
}
