use crate::components::contest_listing::Contest;
use crate::components::google_calendar::{EventDateTime, EventResource};
use chrono_tz::Tz;

/// Series code to Google Calendar color id
pub const COLOR_TABLE: [(&str, &str); 4] = [("ABC", "9"), ("ARC", "6"), ("AGC", "4"), ("OTHER", "11")];

/// Key of the fallback color entry
pub const OTHER_CODE: &str = "OTHER";

/// Look up the color for a series code, falling back to `OTHER`
pub fn color_id(code: Option<&str>) -> &'static str {
    let lookup = |key: &str| {
        COLOR_TABLE
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(key))
            .map(|(_, color)| *color)
    };

    code.and_then(lookup)
        .or_else(|| lookup(OTHER_CODE))
        .unwrap_or("11")
}

/// Event description, `<url> (<rated>)`
pub fn description(contest: &Contest) -> String {
    format!("{} ({})", contest.url, contest.rated)
}

/// Build the event body for a contest
pub fn event_payload(contest: &Contest, time_zone: Tz) -> EventResource {
    EventResource {
        summary: contest.name.clone(),
        start: EventDateTime {
            date_time: contest.start_rfc3339(),
            time_zone: time_zone.name().to_string(),
        },
        end: EventDateTime {
            date_time: contest.end_rfc3339(),
            time_zone: time_zone.name().to_string(),
        },
        color_id: color_id(contest.code.as_deref()).to_string(),
        description: description(contest),
    }
}
