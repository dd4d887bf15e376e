//! Common test helpers

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

/// Initialize tracing output for a test run; safe to call repeatedly
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Receive one broadcast event or give up after `millis`
pub async fn recv_or_timeout<T: Clone>(
    rx: &mut broadcast::Receiver<T>,
    millis: u64,
) -> Option<T> {
    timeout(Duration::from_millis(millis), rx.recv())
        .await
        .ok()
        .and_then(|result| result.ok())
}
