//! Wire types for the ledger's transaction REST API.

use serde::{Deserialize, Serialize};

/// Discriminator the ledger uses for transactions still in the mempool.
const PENDING_KIND: &str = "pending_transaction";

/// Response to a successful transaction submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Opaque transaction hash, used for all later polling.
    pub hash: String,
}

/// A transaction record as returned by `GET /transactions/by_hash/{hash}`.
///
/// Only the fields the lifecycle manager reads are modeled; everything else
/// in the record is irrelevant to confirmation tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    /// Record kind, e.g. `pending_transaction` or `user_transaction`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Execution success flag; absent while pending.
    #[serde(default)]
    pub success: bool,

    /// Human-readable VM status, e.g. an abort location on failure.
    #[serde(default)]
    pub vm_status: Option<String>,

    #[serde(default)]
    pub hash: Option<String>,
}

impl TransactionView {
    /// Whether the ledger still reports this transaction as unresolved.
    pub fn is_pending(&self) -> bool {
        self.kind == PENDING_KIND
    }

    /// Diagnostic text for a resolved-but-failed transaction.
    pub fn failure_text(&self) -> String {
        self.vm_status
            .clone()
            .unwrap_or_else(|| "execution failed with no vm_status".to_string())
    }
}
