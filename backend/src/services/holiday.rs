use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Client;
use tokio::sync::RwLock;

use crate::models::holiday::{parse_holiday_payload, HolidaySet};

/// Default lifetime of a fetched holiday list.
pub const DEFAULT_HOLIDAY_TTL: Duration = Duration::from_secs(12 * 60 * 60);

type HolidayLoader = Arc<
    dyn Fn() -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'static>>
        + Send
        + Sync,
>;

/// Source of the holiday set consumed by the business-time engine.
///
/// Implementations never fail: a provider that cannot obtain holidays
/// answers with an empty set.
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    async fn fetch(&self) -> HolidaySet;
}

#[derive(Debug, Clone)]
struct HolidayCache {
    holidays: HolidaySet,
    fetched_at: Instant,
}

impl HolidayCache {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Loads the holiday document through `load`, parses it in `time_zone` and
/// keeps the result for `ttl`. A failed load is remembered as an empty set
/// for the same lifetime, so an unreachable upstream is asked once per `ttl`.
#[derive(Clone)]
pub struct CachedHolidayProvider {
    load: HolidayLoader,
    ttl: Duration,
    time_zone: Tz,
    cache: Arc<RwLock<Option<HolidayCache>>>,
}

impl CachedHolidayProvider {
    /// Provider backed by an HTTP GET of `url`. Non-2xx answers count as failures.
    pub fn remote(client: Client, url: impl Into<String>, ttl: Duration, time_zone: Tz) -> Self {
        let url = url.into();
        Self::with_loader(
            move || {
                let client = client.clone();
                let url = url.clone();
                async move {
                    let response = client.get(&url).send().await?.error_for_status()?;
                    Ok::<_, anyhow::Error>(response.text().await?)
                }
            },
            ttl,
            time_zone,
        )
    }

    pub fn with_loader<F, Fut>(loader: F, ttl: Duration, time_zone: Tz) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        Self {
            load: Arc::new(move || {
                Box::pin(loader())
                    as Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'static>>
            }),
            ttl,
            time_zone,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn cached(&self) -> Option<HolidaySet> {
        self.cache
            .read()
            .await
            .as_ref()
            .filter(|cache| cache.is_fresh(self.ttl))
            .map(|cache| cache.holidays.clone())
    }

    async fn refresh(&self) -> anyhow::Result<HolidaySet> {
        let body = (self.load)().await?;
        Ok(parse_holiday_payload(&body, self.time_zone)?)
    }

    async fn store(&self, holidays: &HolidaySet) {
        *self.cache.write().await = Some(HolidayCache {
            holidays: holidays.clone(),
            fetched_at: Instant::now(),
        });
    }
}

#[async_trait]
impl HolidayProvider for CachedHolidayProvider {
    async fn fetch(&self) -> HolidaySet {
        if let Some(holidays) = self.cached().await {
            tracing::debug!(count = holidays.len(), "Holiday cache hit");
            return holidays;
        }

        let holidays = match self.refresh().await {
            Ok(holidays) => {
                tracing::info!(count = holidays.len(), "Refreshed holiday list");
                holidays
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Holiday list unavailable, continuing without holidays");
                HolidaySet::new()
            }
        };
        self.store(&holidays).await;
        holidays
    }
}

/// Provider answering with a fixed set.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidayProvider {
    holidays: HolidaySet,
}

impl StaticHolidayProvider {
    pub fn new(holidays: HolidaySet) -> Self {
        Self { holidays }
    }
}

#[async_trait]
impl HolidayProvider for StaticHolidayProvider {
    async fn fetch(&self) -> HolidaySet {
        self.holidays.clone()
    }
}

/// HTTP client used for the remote holiday list.
pub fn holiday_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent("workdays-backend/1.0")
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_provider(
        responses: Vec<anyhow::Result<String>>,
        ttl: Duration,
    ) -> (CachedHolidayProvider, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let responses: Arc<Vec<Result<String, String>>> = Arc::new(
            responses
                .into_iter()
                .map(|r| r.map_err(|e| e.to_string()))
                .collect(),
        );
        let counter = Arc::clone(&calls);
        let provider = CachedHolidayProvider::with_loader(
            move || {
                let index = counter.fetch_add(1, Ordering::SeqCst);
                let response = responses[index.min(responses.len() - 1)].clone();
                async move { response.map_err(|e| anyhow::anyhow!(e)) }
            },
            ttl,
            chrono_tz::America::Bogota,
        );
        (provider, calls)
    }

    #[tokio::test]
    async fn fetch_parses_and_caches_within_ttl() {
        let (provider, calls) =
            counting_provider(vec![Ok(r#"["2025-01-01"]"#.into())], DEFAULT_HOLIDAY_TTL);

        let first = provider.fetch().await;
        let second = provider.fetch().await;

        assert!(first.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_cache_is_refreshed() {
        let (provider, calls) = counting_provider(
            vec![Ok(r#"["2025-01-01"]"#.into()), Ok(r#"["2025-01-06"]"#.into())],
            Duration::ZERO,
        );

        provider.fetch().await;
        let refreshed = provider.fetch().await;

        assert!(refreshed.contains(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn loader_failure_fails_open_and_is_cached() {
        let (provider, calls) = counting_provider(
            vec![Err(anyhow::anyhow!("connection refused")), Ok(r#"["2025-01-01"]"#.into())],
            DEFAULT_HOLIDAY_TTL,
        );

        assert!(provider.fetch().await.is_empty());
        assert!(provider.fetch().await.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cached_failure_is_retried_after_ttl() {
        let (provider, calls) = counting_provider(
            vec![Err(anyhow::anyhow!("connection refused")), Ok(r#"["2025-01-01"]"#.into())],
            Duration::ZERO,
        );

        assert!(provider.fetch().await.is_empty());
        assert_eq!(provider.fetch().await.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn malformed_payload_fails_open_and_is_cached() {
        let (provider, calls) = counting_provider(
            vec![Ok("<html>maintenance</html>".into()), Ok(r#"["2025-01-01"]"#.into())],
            DEFAULT_HOLIDAY_TTL,
        );

        assert!(provider.fetch().await.is_empty());
        assert!(provider.fetch().await.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn static_provider_returns_its_set() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let provider = StaticHolidayProvider::new([date].into_iter().collect());
        assert!(provider.fetch().await.contains(date));
    }

    #[test]
    fn http_client_builds_with_timeout() {
        assert!(holiday_http_client(Duration::from_secs(5)).is_ok());
    }
}
