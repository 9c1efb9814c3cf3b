mod actor;
mod handle;
pub mod models;
pub mod time;
pub mod token;

pub use handle::GoogleCalendarHandle;
pub use models::{CalendarEvent, CalendarListEntry, EventDateTime, EventResource, Page};

use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Operations the reconciler needs from a remote calendar service.
///
/// Every call is a network round trip and may fail with a transient
/// network or auth error.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// One page of the authenticated user's calendar list
    async fn list_calendars(&self, page_token: Option<&str>) -> AppResult<Page<CalendarListEntry>>;

    /// Create a calendar and return its id
    async fn create_calendar(&self, title: &str, time_zone: &str) -> AppResult<String>;

    /// One page of events ending after `time_min`
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> AppResult<Page<CalendarEvent>>;

    async fn create_event(&self, calendar_id: &str, event: &EventResource)
        -> AppResult<CalendarEvent>;

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &EventResource,
    ) -> AppResult<CalendarEvent>;
}
