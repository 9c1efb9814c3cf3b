use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Simplified calendar event representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
}

impl CalendarEvent {
    /// Build an event from a Calendar API event resource
    pub fn from_json(event: &Value) -> Self {
        let text = |key: &str| event.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());
        let boundary = |key: &str, field: &str| {
            event
                .get(key)
                .and_then(|b| b.as_object())
                .and_then(|b| b.get(field))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        CalendarEvent {
            id: text("id").unwrap_or_default(),
            summary: text("summary"),
            description: text("description"),
            start_date_time: boundary("start", "dateTime"),
            start_date: boundary("start", "date"),
            end_date_time: boundary("end", "dateTime"),
            end_date: boundary("end", "date"),
        }
    }
}

/// One entry of the user's calendar list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalendarListEntry {
    pub id: String,
    pub summary: Option<String>,
    pub time_zone: Option<String>,
}

impl CalendarListEntry {
    /// Build an entry from a Calendar API calendarList resource
    pub fn from_json(entry: &Value) -> Self {
        let text = |key: &str| entry.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());
        CalendarListEntry {
            id: text("id").unwrap_or_default(),
            summary: text("summary"),
            time_zone: text("timeZone"),
        }
    }
}

/// A single page of a paginated list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

/// Start or end of an event as sent to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

/// Event body for insert and update requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    pub summary: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub color_id: String,
    pub description: String,
}
