use crate::components::contest_listing::Contest;
use crate::components::google_calendar::time::{get_event_end, get_event_start};
use crate::components::google_calendar::CalendarEvent;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::fmt;

/// Id and time window of an event already on the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredEvent {
    pub id: String,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl RegisteredEvent {
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            id: event.id.clone(),
            start: get_event_start(event),
            end: get_event_end(event),
        }
    }

    /// Whether the stored window equals the contest's, compared as instants
    pub fn matches(&self, contest: &Contest) -> bool {
        self.start == Some(contest.start) && self.end == Some(contest.end)
    }
}

/// Index existing events by summary.
///
/// Events without a summary are ignored. When two events share a summary
/// the later one in `events` wins.
pub fn index_events(events: &[CalendarEvent]) -> HashMap<String, RegisteredEvent> {
    let mut registered = HashMap::with_capacity(events.len());
    for event in events {
        if let Some(summary) = &event.summary {
            registered.insert(summary.clone(), RegisteredEvent::from_event(event));
        }
    }
    registered
}

/// What happened to one contest during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestOutcome {
    pub name: String,
    pub action: SyncAction,
}

/// Per-contest outcomes of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub outcomes: Vec<ContestOutcome>,
}

impl SyncReport {
    fn count(&self, pred: impl Fn(&SyncAction) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.action)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|a| *a == SyncAction::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(|a| *a == SyncAction::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(|a| *a == SyncAction::Unchanged)
    }

    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Failed(_)))
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} unchanged, {} failed",
            self.created(),
            self.updated(),
            self.unchanged(),
            self.failed()
        )
    }
}
