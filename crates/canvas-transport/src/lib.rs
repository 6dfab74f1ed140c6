//! Network transport for the canvas bot.
//!
//! Every account reaches the ledger through its own forward proxy, so the
//! transport builds one HTTP client per route rather than sharing a pool.
//! The [`LedgerClient`] trait is the seam the lifecycle manager tests
//! against; [`HttpLedgerClient`] is the real implementation.

pub mod client;
pub mod error;
pub mod route;

pub use client::{HttpLedgerClient, LedgerClient};
pub use error::TransportError;
pub use route::ProxyRoute;
