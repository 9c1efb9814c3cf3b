use async_trait::async_trait;
use atcoder_calendar::components::contest_listing::{AtCoderListing, Contest, ContestSource};
use atcoder_calendar::components::google_calendar::{
    CalendarEvent, CalendarGateway, CalendarListEntry, EventResource, Page,
};
use atcoder_calendar::components::reconciler::Reconciler;
use atcoder_calendar::config::{Config, DEFAULT_CONTESTS_URL};
use atcoder_calendar::error::{google_calendar_error, AppResult};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Gateway standing in for a calendar service that cannot be reached
struct UnreachableGateway;

#[async_trait]
impl CalendarGateway for UnreachableGateway {
    async fn list_calendars(&self, _page_token: Option<&str>) -> AppResult<Page<CalendarListEntry>> {
        Err(google_calendar_error("unreachable"))
    }

    async fn create_calendar(&self, _title: &str, _time_zone: &str) -> AppResult<String> {
        Err(google_calendar_error("unreachable"))
    }

    async fn list_events(
        &self,
        _calendar_id: &str,
        _time_min: DateTime<Utc>,
        _page_token: Option<&str>,
    ) -> AppResult<Page<CalendarEvent>> {
        Err(google_calendar_error("unreachable"))
    }

    async fn create_event(&self, _calendar_id: &str, _event: &EventResource) -> AppResult<CalendarEvent> {
        Err(google_calendar_error("unreachable"))
    }

    async fn update_event(
        &self,
        _calendar_id: &str,
        _event_id: &str,
        _event: &EventResource,
    ) -> AppResult<CalendarEvent> {
        Err(google_calendar_error("unreachable"))
    }
}

/// Listing source that never finds anything
struct EmptyListing;

#[async_trait]
impl ContestSource for EmptyListing {
    async fn fetch_contests(&self) -> Vec<Contest> {
        Vec::new()
    }
}

/// Smoke test to verify that the config can be built
#[test]
fn test_config_builds() {
    let config = Config {
        google_client_id: "test_client_id".to_string(),
        google_client_secret: "test_client_secret".to_string(),
        token_path: PathBuf::from("credentials/token.json"),
        contests_url: DEFAULT_CONTESTS_URL.to_string(),
    };

    assert_eq!(config.contests_url, "https://atcoder.jp/contests/?lang=ja");
    assert!(AtCoderListing::new(&config.contests_url).is_ok());
}

#[test]
fn test_invalid_listing_url_is_rejected() {
    assert!(AtCoderListing::new("not a url").is_err());
}

/// An empty listing is nothing to sync, even when the calendar is down
#[tokio::test]
async fn test_empty_listing_syncs_nothing() {
    let contests = EmptyListing.fetch_contests().await;
    let reconciler = Reconciler::new(UnreachableGateway);

    let report = reconciler.sync(&contests).await.unwrap();

    assert!(report.outcomes.is_empty());
    assert_eq!(report.to_string(), "0 created, 0 updated, 0 unchanged, 0 failed");
}

/// An unreachable listing page yields no contests instead of an error
#[tokio::test]
async fn test_unreachable_listing_yields_no_contests() {
    let listing = AtCoderListing::new("http://127.0.0.1:9/contests/").unwrap();

    let contests = listing.fetch_contests().await;

    assert!(contests.is_empty());
}

/// Without a calendar there is nothing to write to, so the run fails
#[tokio::test]
async fn test_unreachable_calendar_fails_the_run() {
    let start = DateTime::parse_from_rfc3339("2024-01-01T21:00:00+09:00").unwrap();
    let contest = Contest::new(
        "ABC123",
        "https://atcoder.jp/contests/abc123",
        start,
        chrono::Duration::minutes(100),
        "All",
        Some("ABC".to_string()),
    )
    .unwrap();
    let reconciler = Reconciler::new(UnreachableGateway);

    assert!(reconciler.sync(&[contest]).await.is_err());
}
