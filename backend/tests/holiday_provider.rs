use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::Bogota;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use workdays_backend::{
    models::{calendar::WorkingCalendar, holiday::HolidaySet},
    services::{
        business_time::resolve_business_date,
        holiday::{CachedHolidayProvider, HolidayProvider, DEFAULT_HOLIDAY_TTL},
    },
};

fn failing_provider(calls: Arc<AtomicUsize>) -> CachedHolidayProvider {
    CachedHolidayProvider::with_loader(
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<String, _>(anyhow::anyhow!("upstream timed out")) }
        },
        DEFAULT_HOLIDAY_TTL,
        Bogota,
    )
}

#[tokio::test]
async fn failed_fetch_matches_no_holiday_baseline() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = failing_provider(Arc::clone(&calls));
    let calendar = WorkingCalendar::default();

    let holidays = provider.fetch().await;
    assert!(holidays.is_empty());

    let base = Bogota.with_ymd_and_hms(2025, 4, 10, 10, 0, 0).unwrap();
    for (days, hours) in [(Some(5), None), (None, Some(13)), (Some(3), Some(6))] {
        assert_eq!(
            resolve_business_date(base, days, hours, &holidays, &calendar),
            resolve_business_date(base, days, hours, &HolidaySet::new(), &calendar),
        );
    }
}

#[tokio::test]
async fn failures_are_cached_for_the_ttl() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = failing_provider(Arc::clone(&calls));

    for _ in 0..5 {
        assert!(provider.fetch().await.is_empty());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_callers_share_the_cached_set() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let provider = Arc::new(CachedHolidayProvider::with_loader(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(r#"{"holidays": ["2025-08-07"]}"#.to_string()) }
        },
        Duration::from_secs(60),
        Bogota,
    ));

    provider.fetch().await;
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.fetch().await })
        })
        .collect();

    let expected = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
    for handle in handles {
        assert!(handle.await.unwrap().contains(expected));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn remote_provider_fails_open_when_unreachable() {
    let client = workdays_backend::services::holiday::holiday_http_client(Duration::from_millis(500))
        .expect("http client");
    // Port 9 (discard) on localhost is not expected to serve HTTP.
    let provider =
        CachedHolidayProvider::remote(client, "http://127.0.0.1:9/holidays.json", DEFAULT_HOLIDAY_TTL, Bogota);

    assert!(provider.fetch().await.is_empty());
}
