use super::models::CalendarEvent;
use chrono::{DateTime, FixedOffset};

/// Parse an RFC 3339 timestamp as returned by the Calendar API
pub fn parse_date_time(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// Get event start time, if it is a timed event
pub fn get_event_start(event: &CalendarEvent) -> Option<DateTime<FixedOffset>> {
    event.start_date_time.as_deref().and_then(parse_date_time)
}

/// Get event end time, if it is a timed event
pub fn get_event_end(event: &CalendarEvent) -> Option<DateTime<FixedOffset>> {
    event.end_date_time.as_deref().and_then(parse_date_time)
}
