// Path: crates/api/src/gateway/retry.rs

use super::ContractGateway;
use async_trait::async_trait;
use govscan_telemetry::sinks::metrics;
use govscan_types::error::GatewayError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Upper bound on a single backoff delay.
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Retries transient failures of an inner gateway with exponential backoff.
///
/// Only errors for which [`GatewayError::is_transient`] holds are retried.
/// After `max_retries` retries the last error is returned unchanged, so the
/// caller's fallback policy still applies.
#[derive(Debug, Clone)]
pub struct RetryingGateway<G> {
    inner: G,
    max_retries: u32,
    base_backoff: Duration,
}

impl<G> RetryingGateway<G> {
    /// Wraps `inner`. The first retry waits `base_backoff`, each further one twice as long.
    pub fn new(inner: G, max_retries: u32, base_backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_backoff,
        }
    }

    /// The wrapped gateway.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    fn delay(&self, attempt: u32) -> Duration {
        self.base_backoff
            .saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
            .min(MAX_BACKOFF)
    }

    async fn with_retry<F, Fut>(&self, operation: &str, call: F) -> Result<String, GatewayError>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = Result<String, GatewayError>> + Send,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.delay(attempt);
                    log::debug!(
                        "gateway {} failed (attempt {}): {}; retrying in {:?}",
                        operation,
                        attempt + 1,
                        e,
                        delay
                    );
                    metrics().inc_retries(operation);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl<G: ContractGateway> ContractGateway for RetryingGateway<G> {
    async fn call_read_only(
        &self,
        function_name: &str,
        args: &[String],
    ) -> Result<String, GatewayError> {
        self.with_retry(function_name, || {
            self.inner.call_read_only(function_name, args)
        })
        .await
    }

    async fn get_map_entry(&self, map_name: &str, key_hex: &str) -> Result<String, GatewayError> {
        self.with_retry(map_name, || self.inner.get_map_entry(map_name, key_hex))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails with `error` for the first `failures` calls, then succeeds.
    struct Flaky {
        failures: usize,
        error: GatewayError,
        seen: AtomicUsize,
    }

    impl Flaky {
        fn new(failures: usize, error: GatewayError) -> Self {
            Self {
                failures,
                error,
                seen: AtomicUsize::new(0),
            }
        }

        fn respond(&self) -> Result<String, GatewayError> {
            let n = self.seen.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(self.error.clone())
            } else {
                Ok("0x03".to_string())
            }
        }
    }

    #[async_trait]
    impl ContractGateway for Flaky {
        async fn call_read_only(&self, _f: &str, _args: &[String]) -> Result<String, GatewayError> {
            self.respond()
        }

        async fn get_map_entry(&self, _map: &str, _key: &str) -> Result<String, GatewayError> {
            self.respond()
        }
    }

    fn transient() -> GatewayError {
        GatewayError::Status {
            status: 503,
            body: "busy".into(),
        }
    }

    #[tokio::test]
    async fn test_recovers_within_budget() {
        let gw = RetryingGateway::new(Flaky::new(2, transient()), 3, Duration::from_millis(1));
        assert_eq!(gw.call_read_only("f", &[]).await, Ok("0x03".to_string()));
        assert_eq!(gw.inner().seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_surfaces_last_error_when_exhausted() {
        let gw = RetryingGateway::new(Flaky::new(10, transient()), 2, Duration::from_millis(1));
        assert_eq!(gw.get_map_entry("proposals", "0x00").await, Err(transient()));
        assert_eq!(gw.inner().seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_execution_errors_are_not_retried() {
        let err = GatewayError::Execution("UnwrapFailure".into());
        let gw = RetryingGateway::new(Flaky::new(1, err.clone()), 5, Duration::from_millis(1));
        assert_eq!(gw.call_read_only("f", &[]).await, Err(err));
        assert_eq!(gw.inner().seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let gw = RetryingGateway::new((), 8, Duration::from_millis(100));
        assert_eq!(gw.delay(0), Duration::from_millis(100));
        assert_eq!(gw.delay(1), Duration::from_millis(200));
        assert_eq!(gw.delay(3), Duration::from_millis(800));
        assert_eq!(gw.delay(10), MAX_BACKOFF);
        assert_eq!(gw.delay(40), MAX_BACKOFF);
    }
}
