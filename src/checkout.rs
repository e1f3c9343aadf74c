//! # Checkout Protection
//!
//! Click-gated resolution of the outbound checkout link.
//!
//! A page clone that copies the markup but not this gate keeps working only
//! until the click counter crosses the threshold; from then on every call
//! returns the official URL, whatever link the caller supplies. The counter
//! only grows, so once crossed the gate stays shut.
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{database::CLICK_COUNTER_KEY, error::AppError};

/// Post-increment click count at which the official URL becomes permanent.
pub const CLICK_THRESHOLD: u64 = 15;

const OFFICIAL_URL_SEGMENTS: [&str; 5] = ["https://", "pay.", "lojou.", "app", "/p/zTAQ6"];

/// Assembled from segments so the full URL never appears as one string in
/// the source.
pub fn official_checkout_url() -> String {
    OFFICIAL_URL_SEGMENTS.concat()
}

/// Persistent click counter. `increment` must advance by exactly one per
/// call and return the post-increment value.
#[async_trait]
pub trait ClickStore: Send + Sync {
    async fn increment(&self) -> Result<u64, AppError>;

    async fn current(&self) -> Result<u64, AppError>;
}

pub struct RedisClickStore {
    connection: ConnectionManager,
}

impl RedisClickStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ClickStore for RedisClickStore {
    async fn increment(&self) -> Result<u64, AppError> {
        let mut connection = self.connection.clone();

        // INCR is atomic and treats an absent key as 0, so overlapping
        // double-fire calls still advance the counter once each
        Ok(connection.incr(CLICK_COUNTER_KEY, 1).await?)
    }

    async fn current(&self) -> Result<u64, AppError> {
        let mut connection = self.connection.clone();

        let count: Option<u64> = connection.get(CLICK_COUNTER_KEY).await?;
        Ok(count.unwrap_or(0))
    }
}

pub struct CheckoutResolver<S> {
    store: S,
    official_url: String,
    threshold: u64,
    delay: Duration,
}

impl<S: ClickStore> CheckoutResolver<S> {
    pub fn new(store: S, official_url: String, delay: Duration) -> Self {
        Self {
            store,
            official_url,
            threshold: CLICK_THRESHOLD,
            delay,
        }
    }

    /// Always returns a usable URL. The counter advances before the
    /// decision, on every call, whatever the outcome.
    ///
    /// The delay makes the lookup resemble a remote call; it carries no
    /// other meaning.
    pub async fn resolve(&self, supplied_url: Option<&str>) -> String {
        let count = match self.store.increment().await {
            Ok(count) => count,
            Err(e) => {
                warn!("Click store unavailable, serving official url: {e}");
                return self.official_url.clone();
            }
        };

        sleep(self.delay).await;

        if count >= self.threshold {
            info!("Click threshold reached, enforcing official checkout url");
            return self.official_url.clone();
        }

        // Below the threshold a substituted link is honored so its owner
        // believes it works
        if let Some(url) = supplied_url {
            if url.contains("http") {
                return url.to_string();
            }
        }

        self.official_url.clone()
    }

    pub async fn clicks(&self) -> Result<u64, AppError> {
        self.store.current().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    struct MemoryClickStore {
        count: AtomicU64,
    }

    impl MemoryClickStore {
        fn with_count(count: u64) -> Self {
            Self {
                count: AtomicU64::new(count),
            }
        }
    }

    #[async_trait]
    impl ClickStore for MemoryClickStore {
        async fn increment(&self) -> Result<u64, AppError> {
            Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn current(&self) -> Result<u64, AppError> {
            Ok(self.count.load(Ordering::SeqCst))
        }
    }

    struct UnavailableStore;

    #[async_trait]
    impl ClickStore for UnavailableStore {
        async fn increment(&self) -> Result<u64, AppError> {
            Err(redis::RedisError::from(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "store down",
            ))
            .into())
        }

        async fn current(&self) -> Result<u64, AppError> {
            self.increment().await
        }
    }

    const OFFICIAL: &str = "https://pay.lojou.app/p/zTAQ6";

    fn resolver(start: u64) -> CheckoutResolver<MemoryClickStore> {
        CheckoutResolver::new(
            MemoryClickStore::with_count(start),
            OFFICIAL.to_string(),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn fourteen_unsupplied_calls_stay_official() {
        let resolver = resolver(0);

        for _ in 0..14 {
            assert_eq!(resolver.resolve(None).await, OFFICIAL);
        }

        assert_eq!(resolver.clicks().await.unwrap(), 14);
    }

    #[tokio::test]
    async fn threshold_crossing_call_ignores_supplied_url() {
        let resolver = resolver(14);

        let url = resolver.resolve(Some("http://evil.example/x")).await;

        assert_eq!(url, OFFICIAL);
        assert_eq!(resolver.clicks().await.unwrap(), 15);
    }

    #[tokio::test]
    async fn supplied_url_passes_through_below_threshold() {
        let resolver = resolver(5);

        let url = resolver.resolve(Some("http://evil.example/x")).await;

        assert_eq!(url, "http://evil.example/x");
        assert_eq!(resolver.clicks().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn locked_once_over_threshold() {
        let resolver = resolver(20);

        assert_eq!(resolver.resolve(Some("http://evil.example/x")).await, OFFICIAL);
        assert_eq!(resolver.resolve(None).await, OFFICIAL);
    }

    #[tokio::test]
    async fn supplied_value_without_http_is_not_honored() {
        let resolver = resolver(3);

        assert_eq!(resolver.resolve(Some("javascript:void(0)")).await, OFFICIAL);
    }

    #[tokio::test]
    async fn store_fault_falls_back_to_official() {
        let resolver = CheckoutResolver::new(
            UnavailableStore,
            OFFICIAL.to_string(),
            Duration::ZERO,
        );

        assert_eq!(resolver.resolve(Some("http://evil.example/x")).await, OFFICIAL);
    }

    #[test]
    fn official_url_segments_assemble() {
        assert_eq!(official_checkout_url(), OFFICIAL);
    }
}
