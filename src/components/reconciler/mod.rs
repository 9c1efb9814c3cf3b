pub mod models;
pub mod payload;

pub use models::{index_events, ContestOutcome, RegisteredEvent, SyncAction, SyncReport};
pub use payload::{color_id, event_payload};

use crate::components::contest_listing::Contest;
use crate::components::google_calendar::{CalendarEvent, CalendarGateway};
use crate::error::AppResult;
use chrono::Utc;
use chrono_tz::Tz;
use std::collections::HashMap;
use tracing::{error, info};

/// Title of the calendar the contests are synced into
pub const CALENDAR_TITLE: &str = "AtCoder Calendar";

/// Time zone of the calendar and of every event written to it
pub const CALENDAR_TIME_ZONE: Tz = chrono_tz::Asia::Tokyo;

/// Brings a calendar in line with a list of contests, keyed by contest name
pub struct Reconciler<G> {
    gateway: G,
    time_zone: Tz,
}

impl<G: CalendarGateway> Reconciler<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            time_zone: CALENDAR_TIME_ZONE,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Find the calendar titled [`CALENDAR_TITLE`], creating it if no page of
    /// the calendar list has it
    pub async fn resolve_calendar(&self) -> AppResult<String> {
        let mut page_token: Option<String> = None;
        loop {
            let page = self.gateway.list_calendars(page_token.as_deref()).await?;
            if let Some(calendar) = page
                .items
                .iter()
                .find(|c| c.summary.as_deref() == Some(CALENDAR_TITLE))
            {
                return Ok(calendar.id.clone());
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        info!("Calendar '{}' not found, creating it", CALENDAR_TITLE);
        self.gateway
            .create_calendar(CALENDAR_TITLE, self.time_zone.name())
            .await
    }

    /// All events on the calendar from now on, across every page
    pub async fn load_existing_events(&self, calendar_id: &str) -> AppResult<Vec<CalendarEvent>> {
        let time_min = Utc::now();
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self
                .gateway
                .list_events(calendar_id, time_min, page_token.as_deref())
                .await?;
            events.extend(page.items);

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        Ok(events)
    }

    /// Create, update or skip an event for each contest, in order.
    ///
    /// A failed call is logged and recorded; the remaining contests are
    /// still processed.
    pub async fn diff_and_apply(
        &self,
        contests: &[Contest],
        registered: &HashMap<String, RegisteredEvent>,
        calendar_id: &str,
    ) -> Vec<ContestOutcome> {
        let mut outcomes = Vec::with_capacity(contests.len());

        for contest in contests {
            let action = match registered.get(&contest.name) {
                Some(existing) if existing.matches(contest) => SyncAction::Unchanged,
                Some(existing) => {
                    let payload = event_payload(contest, self.time_zone);
                    match self
                        .gateway
                        .update_event(calendar_id, &existing.id, &payload)
                        .await
                    {
                        Ok(_) => {
                            info!(
                                "Updated {}: {} - {}",
                                contest.name, payload.start.date_time, payload.end.date_time
                            );
                            SyncAction::Updated
                        }
                        Err(e) => {
                            error!("Failed to update contest {}: {:?}", contest.name, e);
                            SyncAction::Failed(e.to_string())
                        }
                    }
                }
                None => {
                    let payload = event_payload(contest, self.time_zone);
                    match self.gateway.create_event(calendar_id, &payload).await {
                        Ok(_) => {
                            info!(
                                "Registered {}: {} - {}",
                                contest.name, payload.start.date_time, payload.end.date_time
                            );
                            SyncAction::Created
                        }
                        Err(e) => {
                            error!("Failed to register contest {}: {:?}", contest.name, e);
                            SyncAction::Failed(e.to_string())
                        }
                    }
                }
            };

            outcomes.push(ContestOutcome {
                name: contest.name.clone(),
                action,
            });
        }

        outcomes
    }

    /// One full run: resolve the calendar, load and index its events, apply.
    ///
    /// Errors resolving the calendar or listing its events abort the run.
    pub async fn sync(&self, contests: &[Contest]) -> AppResult<SyncReport> {
        if contests.is_empty() {
            info!("No contests to sync");
            return Ok(SyncReport::default());
        }

        let calendar_id = self.resolve_calendar().await?;
        let events = self.load_existing_events(&calendar_id).await?;
        let registered = index_events(&events);
        info!(
            "Loaded {} upcoming events from '{}'",
            events.len(),
            CALENDAR_TITLE
        );

        let outcomes = self
            .diff_and_apply(contests, &registered, &calendar_id)
            .await;

        Ok(SyncReport { outcomes })
    }
}
