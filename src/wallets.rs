//! Credential and route file loading.
//!
//! Both inputs are plain text, one entry per line, aligned by position: the
//! account on line N of the wallet file always leaves through the proxy on
//! line N of the route file.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use canvas_transport::ProxyRoute;

use crate::factory::LocalAccount;

/// Lines of this many characters or fewer are blank lines or noise.
const MIN_LINE_LEN: usize = 10;

/// Read a list file: trimmed, noise lines dropped.
pub fn parse_lines(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| line.len() > MIN_LINE_LEN)
        .map(String::from)
        .collect())
}

pub fn load_accounts(path: &Path) -> Result<Vec<LocalAccount>> {
    parse_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, line)| {
            LocalAccount::from_hex_key(line)
                .with_context(|| format!("wallet file line {}", i + 1))
        })
        .collect()
}

pub fn load_routes(path: &Path) -> Result<Vec<ProxyRoute>> {
    Ok(parse_lines(path)?
        .iter()
        .map(|line| ProxyRoute::parse(line))
        .collect())
}

/// Zip accounts with their routes by position.
pub fn pair_accounts_with_routes(
    accounts: Vec<LocalAccount>,
    routes: Vec<ProxyRoute>,
) -> Result<Vec<(LocalAccount, ProxyRoute)>> {
    if routes.len() < accounts.len() {
        bail!(
            "{} wallets but only {} routes; every account needs its own proxy",
            accounts.len(),
            routes.len()
        );
    }
    Ok(accounts.into_iter().zip(routes).collect())
}
