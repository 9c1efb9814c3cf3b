use crate::error::{listing_error, AppResult};
use chrono::{DateTime, Duration, FixedOffset, SecondsFormat};

/// An upcoming contest as listed on the contest page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    /// Contest title, also the key used to find its calendar event
    pub name: String,
    pub url: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Rating range as shown on the listing, e.g. `- 1999` or `All`
    pub rated: String,
    /// Series prefix such as `ABC`, used to pick a color
    pub code: Option<String>,
}

impl Contest {
    /// Build a contest, rejecting an empty name or a non-positive duration
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        start: DateTime<FixedOffset>,
        duration: Duration,
        rated: impl Into<String>,
        code: Option<String>,
    ) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(listing_error("Contest name is empty"));
        }
        if duration <= Duration::zero() {
            return Err(listing_error(&format!(
                "Contest '{}' has a non-positive duration",
                name
            )));
        }
        let end = start
            .checked_add_signed(duration)
            .ok_or_else(|| listing_error(&format!("Contest '{}' ends out of range", name)))?;

        Ok(Self {
            name,
            url: url.into(),
            start,
            end,
            rated: rated.into(),
            code,
        })
    }

    /// Start in canonical RFC 3339 form, e.g. `2024-01-01T21:00:00+09:00`
    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// End in canonical RFC 3339 form
    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}
