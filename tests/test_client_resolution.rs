//! Integration tests for contract client resolution.
//!
//! Run with: `cargo test --test test_client_resolution`

mod common;

use std::sync::Arc;

use alloy::{
    primitives::{address, Address},
    rpc::types::TransactionRequest,
};
use common::{RecordingSigner, MOCK_ACCOUNT};
use devery_client::{
    ethereum::connect_http, AppError, ConnectionConfig, ContractClient, DeploymentRegistry,
    DeveryRegistry, SequentialNonceSigner, SignerOrProvider, TxSigner, DEVERY_ERC721,
    DEVERY_REGISTRY, LOCAL_DEV_CHAIN_ID,
};
use tokio_test::assert_ok;

const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Signer plus private key is rejected before any network call.
#[tokio::test]
async fn test_signer_with_private_key_is_configuration_error() {
    // Unroutable endpoint: reaching the network would surface a transport error instead.
    let provider = connect_http("http://127.0.0.1:1").unwrap();
    let config = ConnectionConfig {
        signer_or_provider: SignerOrProvider::Signer(Arc::new(RecordingSigner::new(0)), provider),
        private_key: Some(TEST_PRIVATE_KEY.into()),
        ..ConnectionConfig::default()
    };

    let result = DeveryRegistry::connect(config, &DeploymentRegistry::bundled()).await;
    assert!(matches!(result, Err(AppError::Config(_))));
}

/// No signer, no provider, unknown network: no deployment address.
#[tokio::test]
async fn test_unknown_network_is_unresolved_address() {
    let config = ConnectionConfig { network_id: Some(987_654), ..ConnectionConfig::default() };

    let result = DeveryRegistry::connect(config, &DeploymentRegistry::bundled()).await;
    match result {
        Err(AppError::UnresolvedAddress { contract, network_id }) => {
            assert_eq!(contract, DEVERY_REGISTRY);
            assert_eq!(network_id, 987_654);
        }
        other => panic!("Expected UnresolvedAddress, got {other:?}"),
    }
}

/// Default network is mainnet, where nothing is bundled.
#[tokio::test]
async fn test_default_network_is_mainnet() {
    let result =
        ContractClient::resolve(DEVERY_REGISTRY, ConnectionConfig::default(), &DeploymentRegistry::bundled())
            .await;
    assert!(matches!(result, Err(AppError::UnresolvedAddress { network_id: 1, .. })));
}

/// Caller-supplied signer is bound as given and keeps its address.
#[tokio::test]
async fn test_supplied_signer_is_bound() {
    let provider = connect_http("http://127.0.0.1:1").unwrap();
    let config = ConnectionConfig {
        signer_or_provider: SignerOrProvider::Signer(Arc::new(RecordingSigner::new(0)), provider),
        network_id: Some(LOCAL_DEV_CHAIN_ID),
        ..ConnectionConfig::default()
    };

    let client =
        ContractClient::resolve(DEVERY_REGISTRY, config, &DeploymentRegistry::bundled()).await.unwrap();
    assert_eq!(client.signer_address().unwrap(), MOCK_ACCOUNT);
    assert_eq!(client.signer().unwrap().address(), MOCK_ACCOUNT);
}

/// Explicit contract address wins over the deployment registry.
#[tokio::test]
async fn test_explicit_contract_address() {
    let explicit: Address = address!("00000000000000000000000000000000000000aa");
    let config = ConnectionConfig {
        network_id: Some(LOCAL_DEV_CHAIN_ID),
        ..ConnectionConfig::default()
    }
    .with_contract_address(explicit);

    let registry = DeveryRegistry::connect(config, &DeploymentRegistry::empty()).await.unwrap();
    assert_eq!(registry.address(), explicit);
}

/// One nonce wrapper shared by two clients hands out one sequence.
#[tokio::test]
async fn test_shared_nonce_signer_across_clients() {
    let inner = RecordingSigner::new(7);
    let shared: Arc<dyn TxSigner> = Arc::new(SequentialNonceSigner::new(inner.clone()));
    let deployments = DeploymentRegistry::bundled();

    let config = |signer: Arc<dyn TxSigner>| ConnectionConfig {
        signer_or_provider: SignerOrProvider::Signer(
            signer,
            connect_http("http://127.0.0.1:1").unwrap(),
        ),
        network_id: Some(LOCAL_DEV_CHAIN_ID),
        ..ConnectionConfig::default()
    };

    let registry = ContractClient::resolve(DEVERY_REGISTRY, config(shared.clone()), &deployments)
        .await
        .unwrap();
    let erc721 =
        ContractClient::resolve(DEVERY_ERC721, config(shared), &deployments).await.unwrap();

    assert_ok!(registry.send(TransactionRequest::default()).await);
    assert_ok!(erc721.send(TransactionRequest::default()).await);
    assert_ok!(registry.send(TransactionRequest::default()).await);

    assert_eq!(inner.sent_nonces(), vec![7, 8, 9]);
    assert_eq!(inner.fetch_count(), 1);
}
