//! Transaction lifecycle: submit, confirm, retry.
//!
//! One submission moves through `Built -> Submitted -> Pending -> Confirmed`
//! with two bounded poll loops: the first waits for the ledger to resolve
//! the transaction (a not-yet-indexed hash counts as pending), the second
//! re-fetches the resolved record until its success flag is set. Any failure
//! anywhere is folded into a single retry decision against the account's
//! failure budget; an exhausted budget abandons the draw with an observable
//! [`Outcome`] instead of an error.

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use canvas_transport::{LedgerClient, TransportError};
use canvas_types::{EntryFunctionCall, RetryConfig, TransactionView};

use crate::factory::{LocalAccount, TransactionFactory};
use crate::retry::RetryLedger;

/// Fixed iteration cap for each of the two poll loops.
pub const POLL_CAP: usize = 50;

/// Gas budget range sampled per attempt.
const MAX_GAS_MIN: u64 = 700;
const MAX_GAS_MAX: u64 = 2000;

const EXPLORER_TX_BASE: &str = "https://explorer.aptoslabs.com/txn";

/// Failures of a single submission attempt.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to build transaction: {0:#}")]
    Build(anyhow::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A poll loop exhausted its iteration cap without resolution.
    #[error("transaction {hash} timed out after {polls} polls")]
    Timeout { hash: String, polls: usize },

    /// The ledger resolved the transaction as unsuccessful.
    #[error("transaction {hash} failed: {reason}")]
    Failed { hash: String, reason: String },
}

impl LifecycleError {
    /// Log-friendly text; rejection bodies carrying a JSON `message` field
    /// are unwrapped to that message.
    pub fn diagnostic(&self) -> String {
        match self {
            LifecycleError::Transport(err) => err.diagnostic(),
            other => other.to_string(),
        }
    }
}

/// Terminal result of a draw, including the fire-and-forget case.
#[derive(Debug)]
pub enum Outcome {
    /// The ledger confirmed the transaction; the final record is attached.
    Confirmed(TransactionView),
    /// The failure budget ran out; the draw was dropped. Observable here and
    /// in the logs, never propagated as an error.
    Abandoned { attempts: u32, reason: String },
}

impl Outcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed(_))
    }
}

/// Drives one payload for one account through submit/confirm/retry.
pub struct LifecycleManager<'a> {
    client: &'a dyn LedgerClient,
    factory: &'a dyn TransactionFactory,
    retries: &'a RetryLedger,
    config: RetryConfig,
}

impl<'a> LifecycleManager<'a> {
    pub fn new(
        client: &'a dyn LedgerClient,
        factory: &'a dyn TransactionFactory,
        retries: &'a RetryLedger,
        config: RetryConfig,
    ) -> Self {
        Self {
            client,
            factory,
            retries,
            config,
        }
    }

    /// Submit the call, retrying failed attempts with a fixed backoff while
    /// the account's failure budget allows. Each retry rebuilds and re-signs
    /// the envelope and goes out over the same route.
    pub async fn submit_draw(&self, account: &LocalAccount, call: &EntryFunctionCall) -> Outcome {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.submit_once(account, call).await {
                Ok(view) => {
                    info!(address = account.address(), attempts, "draw confirmed");
                    return Outcome::Confirmed(view);
                }
                Err(err) => {
                    warn!(
                        address = account.address(),
                        attempts,
                        error = %err.diagnostic(),
                        "draw attempt failed"
                    );
                    if self.retries.should_retry(account.address()) {
                        tokio::time::sleep(self.config.retry_backoff).await;
                        continue;
                    }
                    return Outcome::Abandoned {
                        attempts,
                        reason: err.diagnostic(),
                    };
                }
            }
        }
    }

    async fn submit_once(
        &self,
        account: &LocalAccount,
        call: &EntryFunctionCall,
    ) -> Result<TransactionView, LifecycleError> {
        let max_gas = rand::thread_rng().gen_range(MAX_GAS_MIN..=MAX_GAS_MAX);
        let signed = self
            .factory
            .build_signed(account, call, max_gas)
            .map_err(LifecycleError::Build)?;

        let resp = self.client.submit(&signed.bytes).await?;
        info!(
            "tx: {}/{}?network=mainnet",
            EXPLORER_TX_BASE, resp.hash
        );

        self.wait_for_confirmation(&resp.hash).await
    }

    /// Poll until the ledger confirms `hash` or an iteration cap trips.
    async fn wait_for_confirmation(&self, hash: &str) -> Result<TransactionView, LifecycleError> {
        // Loop 1: wait out the mempool. NotFound means the ledger has not
        // indexed the hash yet and counts as pending.
        let mut resolved = None;
        for poll in 0..POLL_CAP {
            if poll > 0 {
                tokio::time::sleep(self.config.poll_interval).await;
            }
            match self.client.transaction_by_hash(hash).await {
                Ok(view) if view.is_pending() => {}
                Ok(view) => {
                    resolved = Some(view);
                    break;
                }
                Err(TransportError::NotFound) => {}
                Err(err) => return Err(err.into()),
            }
        }
        let Some(mut view) = resolved else {
            return Err(LifecycleError::Timeout {
                hash: hash.to_string(),
                polls: POLL_CAP,
            });
        };

        // Loop 2: the record exists; re-fetch (not merely re-check) until the
        // success flag is set.
        if view.success {
            return Ok(view);
        }
        for _ in 0..POLL_CAP {
            tokio::time::sleep(self.config.poll_interval).await;
            view = self.client.transaction_by_hash(hash).await?;
            if view.success {
                return Ok(view);
            }
        }

        if view.is_pending() {
            Err(LifecycleError::Timeout {
                hash: hash.to_string(),
                polls: POLL_CAP,
            })
        } else {
            Err(LifecycleError::Failed {
                hash: hash.to_string(),
                reason: view.failure_text(),
            })
        }
    }
}
