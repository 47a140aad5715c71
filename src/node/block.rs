//! Block data and producer key recovery.
//!
//! PlatON seals each block header with the producer's node key. The first 32
//! bytes of `extraData` are a vanity prefix; the next 65 bytes are the seal
//! signature over the header hash computed without the signature.

use alloy::primitives::{keccak256, Address, Bloom, Bytes, Signature, B256, U64};
use alloy::rlp::{encode_list, Encodable};
use serde::{Deserialize, Serialize};

use crate::account::address::deserialize_address;
use crate::node::types::{AideError, AideResult};

/// Length of the vanity prefix in `extraData`.
pub const EXTRA_VANITY: usize = 32;
/// Length of the seal signature following the vanity prefix.
pub const EXTRA_SEAL: usize = 65;

/// Header fields returned by `getBlockByNumber` / `getBlockByHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatonBlock {
    pub number: U64,
    pub hash: B256,
    pub parent_hash: B256,
    #[serde(deserialize_with = "deserialize_address")]
    pub miner: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: Bloom,
    pub gas_limit: U64,
    pub gas_used: U64,
    pub timestamp: U64,
    pub extra_data: Bytes,
    /// VRF proof (81 bytes on PlatON).
    pub nonce: Bytes,
    /// Hashes only; full bodies are not requested.
    #[serde(default)]
    pub transactions: Vec<B256>,
}

impl PlatonBlock {
    pub fn number(&self) -> u64 {
        self.number.to::<u64>()
    }

    fn seal_parts(&self) -> AideResult<(&[u8], &[u8])> {
        let extra = self.extra_data.as_ref();
        if extra.len() < EXTRA_VANITY + EXTRA_SEAL {
            return Err(AideError::Recover(format!(
                "extra data of block {} is {} bytes, expected at least {}",
                self.number(),
                extra.len(),
                EXTRA_VANITY + EXTRA_SEAL
            )));
        }
        Ok((
            &extra[..EXTRA_VANITY],
            &extra[EXTRA_VANITY..EXTRA_VANITY + EXTRA_SEAL],
        ))
    }

    /// Hash the producer signed: the header RLP with only the vanity prefix
    /// in place of `extraData`.
    pub fn seal_hash(&self) -> AideResult<B256> {
        let (vanity, _) = self.seal_parts()?;
        let number = self.number.to::<u64>();
        let gas_limit = self.gas_limit.to::<u64>();
        let gas_used = self.gas_used.to::<u64>();
        let timestamp = self.timestamp.to::<u64>();

        let fields: [&dyn Encodable; 12] = [
            &self.parent_hash,
            &self.miner,
            &self.state_root,
            &self.transactions_root,
            &self.receipts_root,
            &self.logs_bloom,
            &number,
            &gas_limit,
            &gas_used,
            &timestamp,
            &vanity,
            &self.nonce,
        ];
        let mut out = Vec::new();
        encode_list::<_, dyn Encodable>(&fields, &mut out);
        Ok(keccak256(out))
    }
}

/// Recover the 64-byte uncompressed public key of the block producer, as hex
/// without `0x`.
pub fn ec_recover(block: &PlatonBlock) -> AideResult<String> {
    let hash = block.seal_hash()?;
    let (_, seal) = block.seal_parts()?;

    let signature = Signature::from_raw(seal)
        .map_err(|e| AideError::Recover(format!("malformed seal signature: {}", e)))?;
    let key = signature
        .recover_from_prehash(&hash)
        .map_err(|e| AideError::Recover(e.to_string()))?;

    let point = key.to_encoded_point(false);
    // Drop the 0x04 uncompressed-point tag.
    Ok(alloy::hex::encode(&point.as_bytes()[1..]))
}
