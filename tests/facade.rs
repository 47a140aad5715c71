//! `PlatonAide` wiring over an in-memory node.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, Bloom, Bytes, B256, U256, U64};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use platon_aide::account::to_bech32;
use platon_aide::node::block::{EXTRA_SEAL, EXTRA_VANITY};
use platon_aide::node::PlatonBlock;
use platon_aide::{AideError, BlockId, PlatonAide, ReturnMode, TxOptions};

mod common;
use common::{offline_config, MockNode, CHAIN_ID, KEY_A};

async fn aide_over(node: Arc<MockNode>) -> PlatonAide {
    PlatonAide::with_rpc(node, &offline_config()).await.unwrap()
}

fn sealed_block(signer: &PrivateKeySigner) -> PlatonBlock {
    let mut block = PlatonBlock {
        number: U64::from(77),
        hash: B256::repeat_byte(0x01),
        parent_hash: B256::repeat_byte(0x02),
        miner: Address::repeat_byte(0x03),
        state_root: B256::repeat_byte(0x04),
        transactions_root: B256::repeat_byte(0x05),
        receipts_root: B256::repeat_byte(0x06),
        logs_bloom: Bloom::default(),
        gas_limit: U64::from(4_712_388),
        gas_used: U64::ZERO,
        timestamp: U64::from(1_700_000_000u64),
        extra_data: Bytes::from(vec![0u8; EXTRA_VANITY + EXTRA_SEAL]),
        nonce: Bytes::from(vec![0x09; 81]),
        transactions: Vec::new(),
    };
    let signature = signer.sign_hash_sync(&block.seal_hash().unwrap()).unwrap();
    let mut extra = vec![0u8; EXTRA_VANITY];
    extra.extend_from_slice(&signature.as_bytes());
    block.extra_data = Bytes::from(extra);
    block
}

#[tokio::test]
async fn test_configured_identity_needs_no_node_calls() {
    let node = Arc::new(MockNode::new());
    let aide = aide_over(node.clone()).await;

    assert_eq!(aide.chain_id(), CHAIN_ID);
    assert_eq!(aide.hrp(), "lat");
    assert_eq!(aide.returns(), ReturnMode::Receipt);
    assert_eq!(node.total_calls(), 0);
}

#[tokio::test]
async fn test_identity_resolved_from_node() {
    let node = Arc::new(MockNode::new());
    let mut config = offline_config();
    config.node.chain_id = None;
    config.node.hrp = None;

    let aide = PlatonAide::with_rpc(node.clone(), &config).await.unwrap();

    assert_eq!(aide.chain_id(), CHAIN_ID);
    assert_eq!(aide.hrp(), "lax");
    assert_eq!(node.calls("chain_id"), 1);
    assert_eq!(node.calls("address_hrp"), 1);
}

#[tokio::test]
async fn test_unrecognized_return_mode_keeps_previous() {
    let mut aide = aide_over(Arc::new(MockNode::new())).await;

    aide.set_returns("hash").unwrap();
    let err = aide.set_returns("bogus").unwrap_err();

    assert!(matches!(err, AideError::InvalidReturnMode(ref s) if s == "bogus"));
    assert_eq!(aide.returns(), ReturnMode::Hash);
}

#[tokio::test]
async fn test_create_account() {
    let aide = aide_over(Arc::new(MockNode::new())).await;

    let (address, private_key) = aide.create_account().unwrap();

    assert!(address.starts_with("lat1"));
    assert_eq!(private_key.len(), 64);
    assert!(!private_key.starts_with("0x"));
}

#[tokio::test]
async fn test_unsent_transfer_to_bech32_recipient() {
    let node = Arc::new(MockNode::new());
    let mut aide = aide_over(node.clone()).await;
    aide.set_returns("txn").unwrap();

    let recipient = Address::repeat_byte(0x42);
    let outcome = aide
        .transfer()
        .transfer(&to_bech32(&recipient, "lat").unwrap(), U256::from(10), TxOptions::new())
        .await
        .unwrap();

    let intent = outcome.intent().unwrap();
    assert_eq!(intent.to, Some(recipient));
    assert_eq!(intent.value, Some(U256::from(10)));
    assert_eq!(node.total_calls(), 0);
}

#[tokio::test]
async fn test_transfer_without_key_fails() {
    let node = Arc::new(MockNode::new());
    let aide = aide_over(node.clone()).await;

    let err = aide
        .transfer()
        .transfer("0x4242424242424242424242424242424242424242", U256::from(1), TxOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AideError::NoSigningKey));
    assert_eq!(node.total_calls(), 0);
}

#[tokio::test]
async fn test_send_transaction_with_default_account() {
    let node = Arc::new(MockNode::new());
    let mut aide = aide_over(node.clone()).await;
    aide.set_default_account(platon_aide::Account::from_private_key(KEY_A, "lat").unwrap());

    let intent = platon_aide::TransactionIntent::new().with_to(Address::repeat_byte(0x01));
    let outcome = aide.send_transaction(intent, None, ReturnMode::Hash).await.unwrap();

    assert!(outcome.hash().is_some());
    assert_eq!(node.calls("send_raw_transaction"), 1);
}

#[tokio::test]
async fn test_contract_deploy_unsent() {
    let node = Arc::new(MockNode::new());
    let aide = aide_over(node.clone()).await;

    let outcome = aide
        .contract()
        .deploy(
            Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
            TxOptions::new().with_returns(ReturnMode::Unsent),
        )
        .await
        .unwrap();

    let intent = outcome.intent().unwrap();
    assert!(intent.to.is_none());
    assert_eq!(node.total_calls(), 0);
}

#[tokio::test]
async fn test_wait_block_with_interval_override() {
    let node = Arc::new(MockNode::new().with_heights(&[1, 2, 3]));
    let aide = aide_over(node.clone()).await;

    let reached = aide.wait_block(Some(3), Some(Duration::ZERO)).await.unwrap();

    assert_eq!(reached, Some(3));
    assert_eq!(node.calls("block_number"), 3);
}

#[tokio::test]
async fn test_ec_recover_through_facade() {
    let signer: PrivateKeySigner = KEY_A.parse().unwrap();
    let node = Arc::new(MockNode::new().with_block(sealed_block(&signer)));
    let aide = aide_over(node).await;

    let public_key = aide.ec_recover(BlockId::from(77)).await.unwrap();

    let raw = alloy::hex::decode(&public_key).unwrap();
    assert_eq!(Address::from_raw_public_key(&raw), signer.address());
}

#[tokio::test]
async fn test_ec_recover_missing_block() {
    let aide = aide_over(Arc::new(MockNode::new())).await;

    let err = aide.ec_recover(BlockId::latest()).await.unwrap_err();

    assert!(matches!(err, AideError::NotFound(_)));
}

#[tokio::test]
async fn test_node_info_passthrough() {
    let node = Arc::new(MockNode::new());
    let aide = aide_over(node.clone()).await;

    let info = aide.node_info().await.unwrap();

    assert_eq!(info.version, 66_048);
    assert_eq!(node.calls("node_info"), 1);
}

#[tokio::test]
async fn test_contract_call_is_read_only() {
    let node = Arc::new(MockNode::new());
    let aide = aide_over(node.clone()).await;
    let target = Address::repeat_byte(0x07);

    let output = aide
        .contract()
        .call(target, Bytes::from_static(&[0x70, 0xa0, 0x82, 0x31]))
        .await
        .unwrap();

    assert_eq!(output.len(), 32);
    assert_eq!(output[31], 42);
    assert_eq!(node.calls("call"), 1);
    assert_eq!(node.calls("send_raw_transaction"), 0);
    let seen = node.calls_seen();
    assert_eq!(seen[0].to, Some(target));
    assert!(seen[0].value.is_none());
}
