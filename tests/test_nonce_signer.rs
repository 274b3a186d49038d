//! Integration tests for sequential nonce assignment.
//!
//! Run with: `cargo test --test test_nonce_signer`

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use alloy::{eips::BlockNumberOrTag, rpc::types::TransactionRequest};
use common::RecordingSigner;
use devery_client::{SequentialNonceSigner, TxSigner};
use futures::future::join_all;
use tokio_test::assert_ok;

/// Base fetch resolves to 5, three concurrent sends get 5, 6, 7.
#[tokio::test]
async fn test_three_concurrent_sends_from_base_five() {
    let inner = RecordingSigner::new(5);
    let signer = SequentialNonceSigner::new(inner.clone());

    let hashes = join_all((0..3).map(|_| signer.send_transaction(TransactionRequest::default()))).await;
    for hash in hashes {
        assert_ok!(hash);
    }

    let mut sent = inner.sent_nonces();
    sent.sort_unstable();
    assert_eq!(sent, vec![5, 6, 7]);

    let next = signer.get_transaction_count(BlockNumberOrTag::Pending).await.unwrap();
    assert_eq!(next, 8);
    assert_eq!(inner.fetch_count(), 1);
}

/// Once primed, each send gets the next nonce in the order it was issued.
#[tokio::test]
async fn test_sends_are_numbered_in_issuance_order() {
    let inner = RecordingSigner::new(5);
    let signer = SequentialNonceSigner::new(inner.clone());

    let (a, b) = tokio::join!(
        signer.get_transaction_count(BlockNumberOrTag::Pending),
        signer.get_transaction_count(BlockNumberOrTag::Pending),
    );
    assert_eq!(a.unwrap(), 5);
    assert_eq!(b.unwrap(), 5);

    let mut hashes = Vec::new();
    for _ in 0..3 {
        hashes.push(signer.send_transaction(TransactionRequest::default()).await.unwrap());
    }

    assert_eq!(inner.sent_nonces(), vec![5, 6, 7]);
    assert_eq!(hashes.iter().map(|h| h[31]).collect::<Vec<_>>(), vec![5, 6, 7]);
    assert_eq!(inner.fetch_count(), 1);
}

/// Many sends across worker threads: no repeats, no gaps, one fetch.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_sends_are_gap_free() {
    const SENDS: u64 = 64;
    let inner = RecordingSigner::new(100);
    let signer = Arc::new(SequentialNonceSigner::new(inner.clone()));

    let tasks: Vec<_> = (0..SENDS)
        .map(|_| {
            let signer = signer.clone();
            tokio::spawn(async move { signer.send_transaction(TransactionRequest::default()).await })
        })
        .collect();

    for task in join_all(tasks).await {
        assert_ok!(task.unwrap());
    }

    let sent = inner.sent_nonces();
    let unique: HashSet<u64> = sent.iter().copied().collect();
    assert_eq!(unique.len(), SENDS as usize);
    assert_eq!(*sent.iter().min().unwrap(), 100);
    assert_eq!(*sent.iter().max().unwrap(), 100 + SENDS - 1);
    assert_eq!(inner.fetch_count(), 1);
}

/// Two concurrent pending reads before the fetch resolves share one fetch.
#[tokio::test]
async fn test_pending_reads_are_deduplicated() {
    let inner = RecordingSigner::new(3);
    let signer = SequentialNonceSigner::new(inner.clone());

    let (a, b) = tokio::join!(
        signer.get_transaction_count(BlockNumberOrTag::Pending),
        signer.get_transaction_count(BlockNumberOrTag::Pending),
    );

    assert_eq!(a.unwrap(), 3);
    assert_eq!(b.unwrap(), 3);
    assert_eq!(inner.fetch_count(), 1);
}

/// An explicit reset makes the next auto-assigned nonce exactly `k`.
#[tokio::test]
async fn test_reset_then_send() {
    let inner = RecordingSigner::new(1);
    let signer = SequentialNonceSigner::new(inner.clone());

    assert_ok!(signer.send_transaction(TransactionRequest::default()).await);
    signer.set_transaction_count(50).await;
    assert_ok!(signer.send_transaction(TransactionRequest::default()).await);

    assert_eq!(inner.sent_nonces(), vec![1, 50]);
}

/// Reserving `m` nonces advances the next auto-assigned nonce by `m`.
#[tokio::test]
async fn test_reservation_advances_next_nonce() {
    let inner = RecordingSigner::new(10);
    let signer = SequentialNonceSigner::new(inner.clone());

    assert_eq!(signer.pending_transaction_count().await.unwrap(), 10);
    assert_ok!(signer.increment_transaction_count(3).await);
    assert_ok!(signer.send_transaction(TransactionRequest::default()).await);

    assert_eq!(inner.sent_nonces(), vec![13]);
}

/// A caller-supplied nonce `k` makes the next auto-assigned nonce `k + 1`.
#[tokio::test]
async fn test_explicit_nonce_is_authoritative() {
    let inner = RecordingSigner::new(10);
    let signer = SequentialNonceSigner::new(inner.clone());

    assert_ok!(signer.send_transaction(TransactionRequest::default()).await);
    assert_ok!(signer.send_transaction(TransactionRequest::default().nonce(30)).await);
    assert_ok!(signer.send_transaction(TransactionRequest::default()).await);

    assert_eq!(inner.sent_nonces(), vec![10, 30, 31]);
}

/// Two wrappers over the same account do not share state.
#[tokio::test]
async fn test_wrappers_do_not_share_state() {
    let inner = RecordingSigner::new(4);
    let first = SequentialNonceSigner::new(inner.clone());
    let second = SequentialNonceSigner::new(inner.clone());

    assert_ok!(first.send_transaction(TransactionRequest::default()).await);
    assert_ok!(second.send_transaction(TransactionRequest::default()).await);

    // Both wrappers hand out 4: the documented one-wrapper-per-sender constraint.
    assert_eq!(inner.sent_nonces(), vec![4, 4]);
    assert_eq!(inner.fetch_count(), 2);
}
