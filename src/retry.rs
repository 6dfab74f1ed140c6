//! Per-account failure accounting.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Tracks consecutive failed attempts per account address and gates retries.
///
/// Counters live for the life of the process and are never reset on success,
/// so the budget is a cap on total failures per account, not per call. The
/// map is mutex-guarded so a future parallel orchestrator can share one
/// ledger across tasks without a redesign.
#[derive(Debug)]
pub struct RetryLedger {
    max_retries: u32,
    counts: Mutex<HashMap<String, u32>>,
}

impl RetryLedger {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Record one failure for `address` and report whether another attempt
    /// is allowed. Returns true exactly `max_retries - 1` times for a given
    /// address, then false forever.
    pub fn should_retry(&self, address: &str) -> bool {
        let mut counts = self.counts.lock();
        let count = counts.entry(address.to_string()).or_insert(0);
        *count += 1;
        *count < self.max_retries
    }

    /// Failures recorded so far for `address`.
    pub fn failures(&self, address: &str) -> u32 {
        self.counts.lock().get(address).copied().unwrap_or(0)
    }
}
