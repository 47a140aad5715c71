//! Signing identities.
//!
//! # Security
//! - Keys are never logged or serialized
//! - CLI keys come from environment variables only

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxHash, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::account::address::to_bech32;
use crate::node::types::{AideError, AideResult};
use crate::transaction::intent::TransactionIntent;

/// A transaction signed and encoded for `sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Bytes,
    pub hash: TxHash,
}

/// A private key together with the address prefix of its network.
#[derive(Clone)]
pub struct Account {
    signer: PrivateKeySigner,
    hrp: String,
}

impl Account {
    /// Generate a fresh random account.
    pub fn create(hrp: &str) -> Self {
        let signer = PrivateKeySigner::random();
        tracing::debug!(address = %signer.address(), "Account created");
        Self {
            signer,
            hrp: hrp.to_string(),
        }
    }

    /// Create an account from a hex-encoded private key (with or without `0x`).
    pub fn from_private_key(private_key_hex: &str, hrp: &str) -> AideResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| AideError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self {
            signer,
            hrp: hrp.to_string(),
        })
    }

    /// Load an account from the named environment variable.
    pub fn from_env(var: &str, hrp: &str) -> AideResult<Self> {
        let private_key = std::env::var(var)
            .map_err(|_| AideError::Wallet(format!("Environment variable {} not set", var)))?;

        Self::from_private_key(&private_key, hrp)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Address in the network's bech32 form.
    pub fn bech32_address(&self) -> AideResult<String> {
        to_bech32(&self.address(), &self.hrp)
    }

    /// Raw private key as hex, without `0x`.
    pub fn private_key_hex(&self) -> String {
        alloy::hex::encode(self.signer.to_bytes())
    }

    /// Sign a complete intent as an EIP-155 legacy transaction.
    pub async fn sign(&self, intent: &TransactionIntent) -> AideResult<SignedTransaction> {
        let missing = |field: &str| AideError::Wallet(format!("cannot sign: {} is not set", field));

        if let Some(from) = intent.from {
            if from != self.address() {
                return Err(AideError::Wallet(format!(
                    "sender {} does not match signing key {}",
                    from,
                    self.address()
                )));
            }
        }

        let tx = TxLegacy {
            chain_id: Some(intent.chain_id.ok_or_else(|| missing("chain id"))?),
            nonce: intent.nonce.ok_or_else(|| missing("nonce"))?,
            gas_price: intent.gas_price.ok_or_else(|| missing("gas price"))?,
            gas_limit: intent.gas.ok_or_else(|| missing("gas"))?,
            to: intent.to.map(TxKind::Call).unwrap_or(TxKind::Create),
            value: intent.value.unwrap_or_default(),
            input: intent.data.clone().unwrap_or_default(),
        };

        let signature = self
            .signer
            .sign_hash(&tx.signature_hash())
            .await
            .map_err(|e| AideError::Wallet(format!("Signing failed: {}", e)))?;

        let signed = tx.into_signed(signature);
        let hash = *signed.hash();
        let raw = Bytes::from(TxEnvelope::from(signed).encoded_2718());

        Ok(SignedTransaction { raw, hash })
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .field("hrp", &self.hrp)
            .finish()
    }
}
