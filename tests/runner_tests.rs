//! Orchestrator loop behavior: balance gating, rotation, bounded cycles.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{account, FetchStep, StubClient, StubFactory};

use canvas_bot::runner::{Identity, RunConfig, Runner};
use canvas_types::{RetryConfig, CANVAS_OBJECT_ID};

fn run_config(max_cycles: u64) -> RunConfig {
    RunConfig {
        canvas_id: CANVAS_OBJECT_ID.to_string(),
        pixels_min: 5,
        pixels_max: 10,
        max_strokes: 2,
        pacing: Duration::ZERO,
        max_cycles: Some(max_cycles),
        retry: RetryConfig::immediate(3),
    }
}

#[tokio::test]
async fn test_zero_balance_account_is_skipped() {
    let broke = Arc::new(StubClient::new(vec![FetchStep::Confirmed]).with_balance(None));
    let funded = Arc::new(StubClient::new(vec![FetchStep::Confirmed]));

    let identities = vec![
        Identity {
            account: account(),
            client: Box::new(Arc::clone(&broke)),
        },
        Identity {
            account: account(),
            client: Box::new(Arc::clone(&funded)),
        },
    ];

    let runner = Runner::new(identities, Box::new(StubFactory), run_config(2));
    runner.run().await.unwrap();

    // the unfunded account never drew; the funded one did
    assert_eq!(broke.submits(), 0);
    assert_eq!(funded.submits(), 1);
}

#[tokio::test]
async fn test_round_robin_wraps_around() {
    let first = Arc::new(StubClient::new(vec![FetchStep::Confirmed]));
    let second = Arc::new(StubClient::new(vec![FetchStep::Confirmed]));

    let identities = vec![
        Identity {
            account: account(),
            client: Box::new(Arc::clone(&first)),
        },
        Identity {
            account: account(),
            client: Box::new(Arc::clone(&second)),
        },
    ];

    // 5 turns over 2 accounts: 3 for the first, 2 for the second
    let runner = Runner::new(identities, Box::new(StubFactory), run_config(5));
    runner.run().await.unwrap();

    assert_eq!(first.submits(), 3);
    assert_eq!(second.submits(), 2);
}

#[tokio::test]
async fn test_abandoned_draw_does_not_stop_the_loop() {
    let dead = Arc::new(
        StubClient::new(vec![FetchStep::Confirmed]).with_submit_failures(u32::MAX),
    );
    let healthy = Arc::new(StubClient::new(vec![FetchStep::Confirmed]));

    let identities = vec![
        Identity {
            account: account(),
            client: Box::new(Arc::clone(&dead)),
        },
        Identity {
            account: account(),
            client: Box::new(Arc::clone(&healthy)),
        },
    ];

    let runner = Runner::new(identities, Box::new(StubFactory), run_config(2));
    runner.run().await.unwrap();

    // the dead account burned its whole budget, then the loop moved on
    assert_eq!(dead.submits(), 3);
    assert_eq!(healthy.submits(), 1);
}

#[tokio::test]
async fn test_empty_account_list_is_an_error() {
    let runner = Runner::new(Vec::new(), Box::new(StubFactory), run_config(1));
    assert!(runner.run().await.is_err());
}
