// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-delay throttle around any [`CatalogLookup`].
//!
//! One instance is shared by every conversation, so the cooldown is global:
//! after a lookup completes, the next one (from any actor) waits until the
//! cooldown has elapsed. Callers queue on the mutex in arrival order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reelbot_config::model::CatalogConfig;
use reelbot_core::types::{AdapterType, Endpoint, HealthStatus, QueryParams};
use reelbot_core::{CatalogLookup, PluginAdapter, ReelbotError};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Serializes lookups and enforces a minimum gap between the end of one call
/// and the start of the next.
pub struct RateLimitedLookup {
    inner: Arc<dyn CatalogLookup>,
    cooldown: Duration,
    last_completed: Mutex<Option<Instant>>,
}

impl RateLimitedLookup {
    pub fn new(inner: Arc<dyn CatalogLookup>, cooldown: Duration) -> Self {
        Self {
            inner,
            cooldown,
            last_completed: Mutex::new(None),
        }
    }

    /// Uses `catalog.cooldown_ms` as the cooldown.
    pub fn from_config(inner: Arc<dyn CatalogLookup>, config: &CatalogConfig) -> Self {
        Self::new(inner, Duration::from_millis(config.cooldown_ms))
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

#[async_trait]
impl PluginAdapter for RateLimitedLookup {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> semver::Version {
        self.inner.version()
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
        self.inner.health_check().await
    }

    async fn shutdown(&self) -> Result<(), ReelbotError> {
        self.inner.shutdown().await
    }
}

#[async_trait]
impl CatalogLookup for RateLimitedLookup {
    async fn lookup(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ReelbotError> {
        // Held across the call: concurrent callers wait their turn here.
        let mut last_completed = self.last_completed.lock().await;

        if let Some(done) = *last_completed {
            let ready_at = done + self.cooldown;
            if ready_at > Instant::now() {
                debug!(
                    endpoint = %endpoint,
                    wait_ms = (ready_at - Instant::now()).as_millis() as u64,
                    "lookup cooling down"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        let result = self.inner.lookup(endpoint, params).await;
        *last_completed = Some(Instant::now());

        if let Err(ref e) = result {
            warn!(endpoint = %endpoint, error = %e, "catalog lookup failed");
        }
        result
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ReelbotError> {
        self.inner.fetch_image(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records when each lookup started and takes `latency` to answer.
    struct StampCatalog {
        starts: std::sync::Mutex<Vec<Instant>>,
        latency: Duration,
        fail: bool,
    }

    impl StampCatalog {
        fn new(latency: Duration) -> Self {
            Self {
                starts: std::sync::Mutex::new(Vec::new()),
                latency,
                fail: false,
            }
        }

        fn starts(&self) -> Vec<Instant> {
            self.starts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PluginAdapter for StampCatalog {
        fn name(&self) -> &str {
            "stamp"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 1)
        }

        fn adapter_type(&self) -> AdapterType {
            AdapterType::Catalog
        }

        async fn health_check(&self) -> Result<HealthStatus, ReelbotError> {
            Ok(HealthStatus::Healthy)
        }

        async fn shutdown(&self) -> Result<(), ReelbotError> {
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogLookup for StampCatalog {
        async fn lookup(
            &self,
            endpoint: Endpoint,
            _params: &QueryParams,
        ) -> Result<serde_json::Value, ReelbotError> {
            self.starts.lock().unwrap().push(Instant::now());
            tokio::time::sleep(self.latency).await;
            if self.fail {
                return Err(ReelbotError::lookup(endpoint.to_string(), "boom"));
            }
            Ok(serde_json::json!([]))
        }

        async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>, ReelbotError> {
            Ok(vec![1, 2, 3])
        }
    }

    fn gaps(starts: &[Instant]) -> Vec<Duration> {
        starts.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_not_delayed() {
        let inner = Arc::new(StampCatalog::new(Duration::ZERO));
        let throttled = RateLimitedLookup::new(inner.clone(), Duration::from_secs(1));

        let begin = Instant::now();
        throttled.lookup(Endpoint::Search, &QueryParams::new()).await.unwrap();
        assert_eq!(inner.starts()[0], begin);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_calls_are_spaced_by_cooldown() {
        let inner = Arc::new(StampCatalog::new(Duration::ZERO));
        let throttled = RateLimitedLookup::new(inner.clone(), Duration::from_secs(1));

        let begin = Instant::now();
        for _ in 0..4 {
            throttled.lookup(Endpoint::Search, &QueryParams::new()).await.unwrap();
        }

        let starts = inner.starts();
        assert_eq!(starts.len(), 4);
        for gap in gaps(&starts) {
            assert!(gap >= Duration::from_secs(1), "gap too short: {gap:?}");
        }
        assert!(starts[3] - begin >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn cooldown_is_measured_from_completion() {
        let inner = Arc::new(StampCatalog::new(Duration::from_millis(400)));
        let throttled = RateLimitedLookup::new(inner.clone(), Duration::from_secs(1));

        throttled.lookup(Endpoint::Search, &QueryParams::new()).await.unwrap();
        throttled.lookup(Endpoint::Search, &QueryParams::new()).await.unwrap();

        let gap = gaps(&inner.starts())[0];
        assert!(gap >= Duration::from_millis(1400), "gap too short: {gap:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_the_cooldown() {
        let inner = Arc::new(StampCatalog::new(Duration::from_millis(10)));
        let throttled = Arc::new(RateLimitedLookup::new(inner.clone(), Duration::from_secs(1)));

        let a = {
            let t = throttled.clone();
            tokio::spawn(async move { t.lookup(Endpoint::Search, &QueryParams::new()).await })
        };
        let b = {
            let t = throttled.clone();
            tokio::spawn(async move { t.lookup(Endpoint::TitleDetails, &QueryParams::new()).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let starts = inner.starts();
        assert_eq!(starts.len(), 2);
        assert!(gaps(&starts)[0] >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn failures_pass_through_and_still_cool_down() {
        let mut stamp = StampCatalog::new(Duration::ZERO);
        stamp.fail = true;
        let inner = Arc::new(stamp);
        let throttled = RateLimitedLookup::new(inner.clone(), Duration::from_secs(1));

        let first = throttled.lookup(Endpoint::Search, &QueryParams::new()).await;
        assert!(first.unwrap_err().is_lookup());
        let _ = throttled.lookup(Endpoint::Search, &QueryParams::new()).await;

        assert!(gaps(&inner.starts())[0] >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn image_fetch_bypasses_throttle() {
        let inner = Arc::new(StampCatalog::new(Duration::ZERO));
        let throttled = RateLimitedLookup::new(inner.clone(), Duration::from_secs(1));

        throttled.lookup(Endpoint::Search, &QueryParams::new()).await.unwrap();
        let begin = Instant::now();
        let bytes = throttled.fetch_image("http://img/x.jpg").await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(Instant::now(), begin);
    }
}
