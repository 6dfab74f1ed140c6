//! Round-robin orchestration across accounts.
//!
//! One logical thread of control: accounts take turns, each turn is a
//! balance gate followed by one draw, and the loop wraps around forever
//! (or until the optional cycle cap for dry runs and tests). A failed
//! account never stops the loop; its turn just ends.

use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use canvas_transport::LedgerClient;
use canvas_types::{DrawPayload, RetryConfig};

use crate::factory::{LocalAccount, TransactionFactory};
use crate::lifecycle::{LifecycleManager, Outcome};
use crate::retry::RetryLedger;
use crate::walk::generate_pixel_set;

/// Base units per displayed coin.
const COIN_SCALE: f64 = 100_000_000.0;

/// Knobs for the orchestrator loop.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub canvas_id: String,
    pub pixels_min: usize,
    pub pixels_max: usize,
    pub max_strokes: usize,
    /// Pause after each draw.
    pub pacing: Duration,
    /// Stop after this many turns; `None` runs forever.
    pub max_cycles: Option<u64>,
    pub retry: RetryConfig,
}

/// One account bound to its own transport route.
pub struct Identity {
    pub account: LocalAccount,
    pub client: Box<dyn LedgerClient>,
}

/// Drives all identities through the draw loop.
pub struct Runner {
    identities: Vec<Identity>,
    factory: Box<dyn TransactionFactory>,
    retries: RetryLedger,
    config: RunConfig,
}

impl Runner {
    pub fn new(
        identities: Vec<Identity>,
        factory: Box<dyn TransactionFactory>,
        config: RunConfig,
    ) -> Self {
        Self {
            identities,
            factory,
            retries: RetryLedger::new(config.retry.max_retries),
            config,
        }
    }

    /// Failure bookkeeping, shared by every turn.
    pub fn retry_ledger(&self) -> &RetryLedger {
        &self.retries
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.identities.is_empty(), "no accounts loaded");

        let mut index = 0usize;
        let mut cycles = 0u64;
        loop {
            if let Some(max) = self.config.max_cycles {
                if cycles >= max {
                    return Ok(());
                }
            }

            self.turn(&self.identities[index]).await;

            cycles += 1;
            index += 1;
            if index >= self.identities.len() {
                index = 0;
            }
        }
    }

    /// One account's turn: balance gate, then a single draw.
    async fn turn(&self, identity: &Identity) {
        let address = identity.account.address();

        let balance = self.check_balance(identity).await;
        if balance == 0 {
            return;
        }

        let pixels = {
            let mut rng = rand::thread_rng();
            let target = rng.gen_range(self.config.pixels_min..=self.config.pixels_max);
            generate_pixel_set(&mut rng, target, self.config.max_strokes)
        };
        let payload = DrawPayload::encode(&pixels, &self.config.canvas_id);
        info!("Drawing {} pixels", payload.len());

        let manager = LifecycleManager::new(
            identity.client.as_ref(),
            self.factory.as_ref(),
            &self.retries,
            self.config.retry,
        );
        match manager
            .submit_draw(&identity.account, &payload.entry_function())
            .await
        {
            Outcome::Confirmed(_) => {}
            Outcome::Abandoned { attempts, reason } => {
                warn!(address, attempts, %reason, "draw abandoned");
            }
        }

        info!("{}", "-".repeat(130));
        tokio::time::sleep(self.config.pacing).await;
    }

    /// Balance in base units; a missing coin store is zero, and other errors
    /// burn retry budget before giving the account a zero for this turn.
    async fn check_balance(&self, identity: &Identity) -> u64 {
        let address = identity.account.address();
        loop {
            match identity.client.account_balance(address).await {
                Ok(units) => {
                    info!("Balance {} APT", units as f64 / COIN_SCALE);
                    return units;
                }
                Err(err) if err.is_not_found() => {
                    info!("Balance 0 APT");
                    return 0;
                }
                Err(err) => {
                    warn!(address, error = %err.diagnostic(), "balance check failed");
                    if !self.retries.should_retry(address) {
                        return 0;
                    }
                    tokio::time::sleep(self.config.retry.balance_backoff).await;
                }
            }
        }
    }
}
