//! Ledger REST client.
//!
//! One [`HttpLedgerClient`] is built per account route so that every
//! request for that account leaves through its own proxy. The client only
//! classifies responses; deciding what a `NotFound` means (still pending,
//! zero balance) is the caller's business.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use canvas_types::{SubmitResponse, TransactionView};

use crate::error::TransportError;
use crate::route::ProxyRoute;

/// Content type for submitted signed-transaction envelopes.
const SIGNED_TX_CONTENT_TYPE: &str = "application/x.aptos.signed_transaction+bcs";

/// Resource holding an account's coin balance.
const COIN_STORE_RESOURCE: &str = "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>";

/// Remote ledger operations the lifecycle manager depends on.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a signed envelope; returns the transaction hash on acceptance.
    async fn submit(&self, signed: &[u8]) -> Result<SubmitResponse, TransportError>;

    /// Fetch a transaction record by hash. `NotFound` means the ledger has
    /// not indexed the hash yet.
    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionView, TransportError>;

    /// Fetch an account's coin balance in base units. `NotFound` means the
    /// account has no coin store registered.
    async fn account_balance(&self, address: &str) -> Result<u64, TransportError>;
}

#[async_trait]
impl<T: LedgerClient + ?Sized> LedgerClient for Arc<T> {
    async fn submit(&self, signed: &[u8]) -> Result<SubmitResponse, TransportError> {
        (**self).submit(signed).await
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionView, TransportError> {
        (**self).transaction_by_hash(hash).await
    }

    async fn account_balance(&self, address: &str) -> Result<u64, TransportError> {
        (**self).account_balance(address).await
    }
}

#[derive(Deserialize)]
struct CoinStoreResource {
    data: CoinStoreData,
}

#[derive(Deserialize)]
struct CoinStoreData {
    coin: CoinValue,
}

#[derive(Deserialize)]
struct CoinValue {
    value: String,
}

/// REST implementation of [`LedgerClient`] over a single route.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpLedgerClient {
    /// Default request timeout in seconds.
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds.
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Create a client that talks to the endpoint directly.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::build(base_url, None)
    }

    /// Create a client whose every request is tunneled through `route`.
    pub fn with_route(base_url: &str, route: &ProxyRoute) -> Result<Self, TransportError> {
        let proxy = reqwest::Proxy::all(route.as_str())?;
        Self::build(base_url, Some(proxy))
    }

    fn build(base_url: &str, proxy: Option<reqwest::Proxy>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(Self::DEFAULT_CONNECT_TIMEOUT_SECS));
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    /// Turn an error-status response into the matching taxonomy variant.
    async fn classify(resp: reqwest::Response) -> Result<reqwest::Response, TransportError> {
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound);
        }
        if status.is_client_error() || status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn submit(&self, signed: &[u8]) -> Result<SubmitResponse, TransportError> {
        let url = format!("{}/transactions", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("Content-Type", SIGNED_TX_CONTENT_TYPE)
            .body(signed.to_vec())
            .send()
            .await?;

        // Submission has no meaningful 404; fold it into a plain rejection.
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "transaction submitted");
        Ok(resp.json::<SubmitResponse>().await?)
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionView, TransportError> {
        let url = format!("{}/transactions/by_hash/{}", self.base_url, hash);
        let resp = Self::classify(self.http.get(&url).send().await?).await?;
        Ok(resp.json::<TransactionView>().await?)
    }

    async fn account_balance(&self, address: &str) -> Result<u64, TransportError> {
        let url = format!(
            "{}/accounts/{}/resource/{}",
            self.base_url, address, COIN_STORE_RESOURCE
        );
        let resp = Self::classify(self.http.get(&url).send().await?).await?;
        let store = resp.json::<CoinStoreResource>().await?;
        store.data.coin.value.parse::<u64>().map_err(|_| {
            TransportError::Malformed(format!(
                "coin value {:?} is not a u64",
                store.data.coin.value
            ))
        })
    }
}
