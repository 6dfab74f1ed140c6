//! Shared types for the canvas-bot workspace.
//!
//! This crate provides the foundational types used across the workspace,
//! keeping the transport and bot crates free of circular dependencies:
//! - [`grid`] - grid geometry: points, bounds, walks and pixel sets
//! - [`payload`] - the parallel-array draw payload and its entry-function form
//! - [`transaction`] - wire types returned by the ledger's REST API

pub mod grid;
pub mod payload;
pub mod transaction;

// Re-export commonly used types at crate root
pub use grid::{Bounds, GridPoint, Pixel, PixelSet, Walk, MAX_COLOR};
pub use payload::{DrawPayload, EntryFunctionCall, CANVAS_OBJECT_ID, DRAW_FUNCTION};
pub use transaction::{SubmitResponse, TransactionView};

use std::time::Duration;

/// Configuration for retry and pacing behavior around ledger operations.
#[derive(Debug, Copy, Clone)]
pub struct RetryConfig {
    /// Maximum consecutive failures per account before giving up.
    pub max_retries: u32,
    /// Backoff before re-submitting after a failed attempt.
    pub retry_backoff: Duration,
    /// Interval between confirmation polls.
    pub poll_interval: Duration,
    /// Backoff between balance-check retries.
    pub balance_backoff: Duration,
}

impl RetryConfig {
    /// Create a new RetryConfig with millisecond intervals.
    pub fn new(
        max_retries: u32,
        retry_backoff_ms: u64,
        poll_interval_ms: u64,
        balance_backoff_ms: u64,
    ) -> Self {
        Self {
            max_retries,
            retry_backoff: Duration::from_millis(retry_backoff_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
            balance_backoff: Duration::from_millis(balance_backoff_ms),
        }
    }

    /// A config with all waits zeroed, for tests that drive poll loops directly.
    pub fn immediate(max_retries: u32) -> Self {
        Self::new(max_retries, 0, 0, 0)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff: Duration::from_millis(10_000),
            poll_interval: Duration::from_millis(1_000),
            balance_backoff: Duration::from_millis(2_000),
        }
    }
}
