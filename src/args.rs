use clap::Parser;
use std::path::PathBuf;

use canvas_types::{RetryConfig, CANVAS_OBJECT_ID};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Fullnode REST endpoint (v1 API root).
    #[arg(long, default_value = "https://fullnode.mainnet.aptoslabs.com/v1")]
    pub rpc_url: String,

    /// Private key list, one hex key per line (`0x` prefix optional).
    #[arg(long, value_name = "PATH", default_value = "wallets.txt")]
    pub wallets: PathBuf,

    /// Proxy list, line-aligned with the wallet list.
    #[arg(long, value_name = "PATH", default_value = "proxy.txt")]
    pub proxies: PathBuf,

    /// Canvas object to draw on.
    #[arg(long, default_value = CANVAS_OBJECT_ID)]
    pub canvas_id: String,

    /// Maximum consecutive failures per account before giving up.
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Smallest pixel count per draw.
    #[arg(long, default_value_t = 120)]
    pub pixels_min: usize,

    /// Largest pixel count per draw.
    #[arg(long, default_value_t = 200)]
    pub pixels_max: usize,

    /// Maximum independent strokes per draw.
    #[arg(long, default_value_t = 4)]
    pub max_strokes: usize,

    /// Pause after each draw in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    pub sleep_ms: u64,

    /// Confirmation poll interval in milliseconds.
    #[arg(long, default_value_t = 1_000)]
    pub poll_interval_ms: u64,

    /// Backoff before re-submitting a failed draw, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub retry_backoff_ms: u64,

    /// Backoff between balance-check retries, in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    pub balance_backoff_ms: u64,

    /// Stop after this many account turns (default: run forever).
    #[arg(long, value_name = "N")]
    pub max_cycles: Option<u64>,
}

impl Args {
    /// Validate CLI arguments for conflicts and requirements.
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.retries == 0 {
            return Err("--retries must be at least 1".to_string());
        }
        if self.pixels_min == 0 {
            return Err("--pixels-min must be at least 1".to_string());
        }
        if self.pixels_min > self.pixels_max {
            return Err("--pixels-min must not exceed --pixels-max".to_string());
        }
        if self.max_strokes == 0 {
            return Err("--max-strokes must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.retries,
            self.retry_backoff_ms,
            self.poll_interval_ms,
            self.balance_backoff_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let args = Args::parse_from(["canvas-bot"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.canvas_id, CANVAS_OBJECT_ID);
    }

    #[test]
    fn test_inverted_pixel_range_rejected() {
        let args = Args::parse_from(["canvas-bot", "--pixels-min", "200", "--pixels-max", "100"]);
        assert!(args.validate().unwrap_err().contains("--pixels-min"));
    }

    #[test]
    fn test_zero_retries_rejected() {
        let args = Args::parse_from(["canvas-bot", "--retries", "0"]);
        assert!(args.validate().unwrap_err().contains("--retries"));
    }

    #[test]
    fn test_retry_config_bridges_durations() {
        let args = Args::parse_from(["canvas-bot", "--retry-backoff-ms", "500"]);
        let config = args.retry_config();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_backoff.as_millis(), 500);
        assert_eq!(config.poll_interval.as_millis(), 1_000);
    }
}
