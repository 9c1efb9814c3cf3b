use super::actor::GoogleCalendarActorHandle;
use super::models::{CalendarEvent, CalendarListEntry, EventResource, Page};
use super::token::TokenManager;
use super::CalendarGateway;
use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarHandle {
    actor_handle: GoogleCalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GoogleCalendarHandle {
    /// Create a new GoogleCalendarHandle and spawn the actor
    pub async fn new(config: Arc<RwLock<Config>>) -> Self {
        use super::actor::GoogleCalendarActor;

        let token_path = config.read().await.token_path.clone();
        let token_manager = TokenManager::new(Arc::clone(&config), token_path);

        // Create the actor and get its handle
        let (mut actor, handle) = GoogleCalendarActor::new(token_manager);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarHandle {
    async fn list_calendars(&self, page_token: Option<&str>) -> AppResult<Page<CalendarListEntry>> {
        self.actor_handle
            .list_calendars(page_token.map(str::to_string))
            .await
    }

    async fn create_calendar(&self, title: &str, time_zone: &str) -> AppResult<String> {
        self.actor_handle
            .create_calendar(title.to_string(), time_zone.to_string())
            .await
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> AppResult<Page<CalendarEvent>> {
        self.actor_handle
            .list_events(
                calendar_id.to_string(),
                time_min,
                page_token.map(str::to_string),
            )
            .await
    }

    async fn create_event(
        &self,
        calendar_id: &str,
        event: &EventResource,
    ) -> AppResult<CalendarEvent> {
        self.actor_handle
            .create_event(calendar_id.to_string(), event.clone())
            .await
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &EventResource,
    ) -> AppResult<CalendarEvent> {
        self.actor_handle
            .update_event(calendar_id.to_string(), event_id.to_string(), event.clone())
            .await
    }
}
