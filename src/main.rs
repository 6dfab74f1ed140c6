use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use canvas_bot::args::Args;
use canvas_bot::factory::JsonEnvelopeFactory;
use canvas_bot::runner::{Identity, RunConfig, Runner};
use canvas_bot::wallets;
use canvas_transport::{HttpLedgerClient, LedgerClient};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate().map_err(|e| anyhow!(e))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let accounts = wallets::load_accounts(&args.wallets)?;
    let routes = wallets::load_routes(&args.proxies)?;
    let pairs = wallets::pair_accounts_with_routes(accounts, routes)?;

    let identities = pairs
        .into_iter()
        .map(|(account, route)| {
            let client = HttpLedgerClient::with_route(&args.rpc_url, &route)
                .with_context(|| format!("build client for route {route}"))?;
            Ok(Identity {
                account,
                client: Box::new(client) as Box<dyn LedgerClient>,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(accounts = identities.len(), rpc = %args.rpc_url, "starting draw loop");

    let config = RunConfig {
        canvas_id: args.canvas_id.clone(),
        pixels_min: args.pixels_min,
        pixels_max: args.pixels_max,
        max_strokes: args.max_strokes,
        pacing: Duration::from_millis(args.sleep_ms),
        max_cycles: args.max_cycles,
        retry: args.retry_config(),
    };

    Runner::new(identities, Box::new(JsonEnvelopeFactory), config)
        .run()
        .await
}
