//! Shared stubs for lifecycle and runner tests.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use canvas_bot::factory::{LocalAccount, SignedEnvelope, TransactionFactory};
use canvas_transport::{LedgerClient, TransportError};
use canvas_types::{EntryFunctionCall, SubmitResponse, TransactionView};

pub const TEST_KEY: &str = "0x0102030405060708091011121314151617181920212223242526272829303132";

pub fn account() -> LocalAccount {
    LocalAccount::from_hex_key(TEST_KEY).unwrap()
}

pub fn draw_call() -> EntryFunctionCall {
    use canvas_types::{DrawPayload, GridPoint, Pixel, PixelSet, CANVAS_OBJECT_ID};
    let set = PixelSet::from_pixels(vec![Pixel {
        point: GridPoint::new(1, 2),
        color: 3,
    }]);
    DrawPayload::encode(&set, CANVAS_OBJECT_ID).entry_function()
}

pub struct StubFactory;

impl TransactionFactory for StubFactory {
    fn build_signed(
        &self,
        _account: &LocalAccount,
        _call: &EntryFunctionCall,
        _max_gas: u64,
    ) -> anyhow::Result<SignedEnvelope> {
        Ok(SignedEnvelope {
            bytes: b"stub-envelope".to_vec(),
        })
    }
}

/// One scripted answer to a transaction fetch. The last step of a script
/// repeats forever.
#[derive(Clone)]
pub enum FetchStep {
    Pending,
    NotFound,
    Confirmed,
    Failed(&'static str),
    Error(u16),
}

/// Counting ledger stub driven by a fetch script.
pub struct StubClient {
    script: Mutex<Vec<FetchStep>>,
    submit_failures: Mutex<u32>,
    balance: Option<u64>,
    submit_count: Mutex<usize>,
    fetch_count: Mutex<usize>,
}

impl StubClient {
    pub fn new(script: Vec<FetchStep>) -> Self {
        assert!(!script.is_empty(), "script needs at least one step");
        Self {
            script: Mutex::new(script),
            submit_failures: Mutex::new(0),
            balance: Some(100_000_000),
            submit_count: Mutex::new(0),
            fetch_count: Mutex::new(0),
        }
    }

    /// Reject the first `n` submissions with a 500 before accepting.
    pub fn with_submit_failures(self, n: u32) -> Self {
        *self.submit_failures.lock() = n;
        self
    }

    /// `None` makes balance checks answer 404 (no coin store).
    pub fn with_balance(mut self, balance: Option<u64>) -> Self {
        self.balance = balance;
        self
    }

    pub fn submits(&self) -> usize {
        *self.submit_count.lock()
    }

    pub fn fetches(&self) -> usize {
        *self.fetch_count.lock()
    }

    fn next_step(&self) -> FetchStep {
        let mut script = self.script.lock();
        if script.len() > 1 {
            script.remove(0)
        } else {
            script[0].clone()
        }
    }
}

fn view(kind: &str, success: bool, vm_status: Option<&str>) -> TransactionView {
    TransactionView {
        kind: kind.to_string(),
        success,
        vm_status: vm_status.map(String::from),
        hash: Some("0xfeed".to_string()),
    }
}

#[async_trait]
impl LedgerClient for StubClient {
    async fn submit(&self, _signed: &[u8]) -> Result<SubmitResponse, TransportError> {
        *self.submit_count.lock() += 1;
        let mut failures = self.submit_failures.lock();
        if *failures > 0 {
            *failures -= 1;
            return Err(TransportError::Rejected {
                status: 500,
                body: r#"{"message":"internal error"}"#.to_string(),
            });
        }
        Ok(SubmitResponse {
            hash: "0xfeed".to_string(),
        })
    }

    async fn transaction_by_hash(&self, _hash: &str) -> Result<TransactionView, TransportError> {
        *self.fetch_count.lock() += 1;
        match self.next_step() {
            FetchStep::Pending => Ok(view("pending_transaction", false, None)),
            FetchStep::NotFound => Err(TransportError::NotFound),
            FetchStep::Confirmed => {
                Ok(view("user_transaction", true, Some("Executed successfully")))
            }
            FetchStep::Failed(status) => Ok(view("user_transaction", false, Some(status))),
            FetchStep::Error(status) => Err(TransportError::Rejected {
                status,
                body: "upstream error".to_string(),
            }),
        }
    }

    async fn account_balance(&self, _address: &str) -> Result<u64, TransportError> {
        match self.balance {
            Some(units) => Ok(units),
            None => Err(TransportError::NotFound),
        }
    }
}

// Runner tests hand the same stub to the runner and keep a handle for
// assertions via `Arc<StubClient>`, which is a `LedgerClient` through the
// blanket `Arc<T>` impl in `canvas-transport`.
