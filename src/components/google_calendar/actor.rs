use super::models::{CalendarEvent, CalendarListEntry, EventResource, Page};
use super::token::TokenManager;
use crate::error::{google_calendar_error, AppResult};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use url::Url;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// The Google Calendar actor that processes messages
pub struct GoogleCalendarActor {
    token_manager: TokenManager,
    client: Client,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

type Reply<T> = oneshot::Sender<AppResult<T>>;

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    ListCalendars {
        page_token: Option<String>,
        reply: Reply<Page<CalendarListEntry>>,
    },
    CreateCalendar {
        title: String,
        time_zone: String,
        reply: Reply<String>,
    },
    ListEvents {
        calendar_id: String,
        time_min: DateTime<Utc>,
        page_token: Option<String>,
        reply: Reply<Page<CalendarEvent>>,
    },
    CreateEvent {
        calendar_id: String,
        event: EventResource,
        reply: Reply<CalendarEvent>,
    },
    UpdateEvent {
        calendar_id: String,
        event_id: String,
        event: EventResource,
        reply: Reply<CalendarEvent>,
    },
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Send a command and wait for the actor's reply
    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> GoogleCalendarCommand,
    ) -> AppResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))?;

        reply_rx
            .await
            .map_err(|_| google_calendar_error("Response channel closed"))?
    }

    pub async fn list_calendars(
        &self,
        page_token: Option<String>,
    ) -> AppResult<Page<CalendarListEntry>> {
        self.request(|reply| GoogleCalendarCommand::ListCalendars { page_token, reply })
            .await
    }

    pub async fn create_calendar(&self, title: String, time_zone: String) -> AppResult<String> {
        self.request(|reply| GoogleCalendarCommand::CreateCalendar {
            title,
            time_zone,
            reply,
        })
        .await
    }

    pub async fn list_events(
        &self,
        calendar_id: String,
        time_min: DateTime<Utc>,
        page_token: Option<String>,
    ) -> AppResult<Page<CalendarEvent>> {
        self.request(|reply| GoogleCalendarCommand::ListEvents {
            calendar_id,
            time_min,
            page_token,
            reply,
        })
        .await
    }

    pub async fn create_event(
        &self,
        calendar_id: String,
        event: EventResource,
    ) -> AppResult<CalendarEvent> {
        self.request(|reply| GoogleCalendarCommand::CreateEvent {
            calendar_id,
            event,
            reply,
        })
        .await
    }

    pub async fn update_event(
        &self,
        calendar_id: String,
        event_id: String,
        event: EventResource,
    ) -> AppResult<CalendarEvent> {
        self.request(|reply| GoogleCalendarCommand::UpdateEvent {
            calendar_id,
            event_id,
            event,
            reply,
        })
        .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(token_manager: TokenManager) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            token_manager,
            client: Client::new(),
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::ListCalendars { page_token, reply } => {
                    let result = self.list_calendars(page_token.as_deref()).await;
                    let _ = reply.send(result);
                }
                GoogleCalendarCommand::CreateCalendar {
                    title,
                    time_zone,
                    reply,
                } => {
                    let result = self.create_calendar(&title, &time_zone).await;
                    let _ = reply.send(result);
                }
                GoogleCalendarCommand::ListEvents {
                    calendar_id,
                    time_min,
                    page_token,
                    reply,
                } => {
                    let result = self
                        .list_events(&calendar_id, time_min, page_token.as_deref())
                        .await;
                    let _ = reply.send(result);
                }
                GoogleCalendarCommand::CreateEvent {
                    calendar_id,
                    event,
                    reply,
                } => {
                    let result = self.create_event(&calendar_id, &event).await;
                    let _ = reply.send(result);
                }
                GoogleCalendarCommand::UpdateEvent {
                    calendar_id,
                    event_id,
                    event,
                    reply,
                } => {
                    let result = self.update_event(&calendar_id, &event_id, &event).await;
                    let _ = reply.send(result);
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }

    async fn list_calendars(&self, page_token: Option<&str>) -> AppResult<Page<CalendarListEntry>> {
        let mut url = api_url(&["users", "me", "calendarList"])?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }

        let body = self.send(self.client.get(url)).await?;
        let items = items(&body)
            .iter()
            .map(CalendarListEntry::from_json)
            .collect();

        Ok(Page {
            items,
            next_page_token: next_page_token(&body),
        })
    }

    async fn create_calendar(&self, title: &str, time_zone: &str) -> AppResult<String> {
        let url = api_url(&["calendars"])?;
        let request = self
            .client
            .post(url)
            .json(&json!({ "summary": title, "timeZone": time_zone }));

        let body = self.send(request).await?;
        body.get("id")
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
            .ok_or_else(|| google_calendar_error("Created calendar has no id"))
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> AppResult<Page<CalendarEvent>> {
        let mut url = api_url(&["calendars", calendar_id, "events"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("timeMin", &time_min.to_rfc3339_opts(SecondsFormat::Secs, true));
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        let body = self.send(self.client.get(url)).await?;
        let items = items(&body).iter().map(CalendarEvent::from_json).collect();

        Ok(Page {
            items,
            next_page_token: next_page_token(&body),
        })
    }

    async fn create_event(&self, calendar_id: &str, event: &EventResource) -> AppResult<CalendarEvent> {
        let url = api_url(&["calendars", calendar_id, "events"])?;
        let body = self.send(self.client.post(url).json(event)).await?;
        Ok(CalendarEvent::from_json(&body))
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &EventResource,
    ) -> AppResult<CalendarEvent> {
        let url = api_url(&["calendars", calendar_id, "events", event_id])?;
        let body = self.send(self.client.put(url).json(event)).await?;
        Ok(CalendarEvent::from_json(&body))
    }

    /// Authorize, send and decode a request, turning non-2xx into errors
    async fn send(&self, request: RequestBuilder) -> AppResult<Value> {
        let access_token = self.token_manager.access_token().await?;

        let response = request
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Request failed: {}", e)))?;

        let status = response.status();
        debug!("Calendar API responded with {}", status);
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse response: {}", e)))
    }
}

/// Build an API URL, percent-encoding every path segment
fn api_url(segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(CALENDAR_API_BASE)
        .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| google_calendar_error("API base URL cannot have path segments"))?
        .extend(segments);
    Ok(url)
}

fn items(body: &Value) -> &[Value] {
    body.get("items")
        .and_then(|i| i.as_array())
        .map(|i| i.as_slice())
        .unwrap_or(&[])
}

fn next_page_token(body: &Value) -> Option<String> {
    body.get("nextPageToken")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}
