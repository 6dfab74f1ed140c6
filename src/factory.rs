//! Accounts and transaction building.
//!
//! Signing and the ledger's native envelope serialization are deliberately
//! behind the [`TransactionFactory`] seam: the lifecycle manager only ever
//! sees opaque signed bytes, and tests substitute a stub factory.

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use sha2::{Digest, Sha256};

use canvas_types::EntryFunctionCall;

/// A signing principal: raw key material plus its derived address.
///
/// Owned by the orchestrator and passed by reference into the core; nothing
/// downstream mutates it.
#[derive(Debug, Clone)]
pub struct LocalAccount {
    key: [u8; 32],
    address: String,
}

impl LocalAccount {
    /// Parse one line of the wallet file: a hex private key, `0x` prefix
    /// optional.
    pub fn from_hex_key(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let bytes = hex::decode(hex_str).context("private key is not valid hex")?;
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| anyhow!("private key must be 32 bytes, got {}", b.len()))?;

        // Address derivation is a stable digest of the key; the ledger-side
        // authentication scheme is the signer backend's concern.
        let address = format!("0x{}", hex::encode(Sha256::digest(key)));

        Ok(Self { key, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// An opaque signed transaction envelope, ready for submission.
#[derive(Debug, Clone)]
pub struct SignedEnvelope {
    pub bytes: Vec<u8>,
}

/// Builds and signs a transaction envelope for one entry-function call.
pub trait TransactionFactory: Send + Sync {
    fn build_signed(
        &self,
        account: &LocalAccount,
        call: &EntryFunctionCall,
        max_gas: u64,
    ) -> Result<SignedEnvelope>;
}

/// Default factory: a JSON envelope with a key-derived authenticator tag.
#[derive(Debug, Default)]
pub struct JsonEnvelopeFactory;

impl TransactionFactory for JsonEnvelopeFactory {
    fn build_signed(
        &self,
        account: &LocalAccount,
        call: &EntryFunctionCall,
        max_gas: u64,
    ) -> Result<SignedEnvelope> {
        let envelope = json!({
            "sender": account.address,
            "max_gas_amount": max_gas.to_string(),
            "payload": {
                "type": "entry_function_payload",
                "function": call.function,
                "type_arguments": call.type_arguments,
                "arguments": call.arguments,
            },
        });
        let body = serde_json::to_vec(&envelope).context("serialize envelope")?;

        let mut hasher = Sha256::new();
        hasher.update(&body);
        hasher.update(account.key);
        let authenticator = hex::encode(hasher.finalize());

        let signed = json!({
            "envelope": envelope,
            "authenticator": authenticator,
        });
        Ok(SignedEnvelope {
            bytes: serde_json::to_vec(&signed).context("serialize signed envelope")?,
        })
    }
}
