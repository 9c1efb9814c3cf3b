use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Asia::Tokyo;

/// Parse a contest duration in `HH:MM` format; hours may exceed 24
pub fn parse_duration(duration_str: &str) -> Option<Duration> {
    let parts: Vec<&str> = duration_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hours = parts[0].parse::<i64>().ok()?;
    let minutes = parts[1].parse::<i64>().ok()?;
    if hours < 0 || !(0..60).contains(&minutes) {
        return None;
    }
    Duration::try_hours(hours)?.checked_add(&Duration::try_minutes(minutes)?)
}

/// Japan Standard Time as a fixed offset; Japan has no daylight saving
pub fn jst() -> FixedOffset {
    Tokyo.offset_from_utc_datetime(&Utc::now().naive_utc()).fix()
}

/// Parse a contest start time.
///
/// The listing renders `2024-01-06 21:00:00+0900`. Any other text holding a
/// `YYYY-MM-DD` date followed by an `HH:MM` time is read as Japan time.
/// The result is always at +09:00.
pub fn parse_start_time(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.with_timezone(&jst()));
    }

    let (date, rest) = find_date(text)?;
    let time = find_time(rest)?;
    jst().from_local_datetime(&date.and_time(time)).single()
}

fn find_date(text: &str) -> Option<(NaiveDate, &str)> {
    (0..text.len()).find_map(|i| {
        let candidate = text.get(i..i + 10)?;
        let date = NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()?;
        Some((date, &text[i + 10..]))
    })
}

fn find_time(text: &str) -> Option<NaiveTime> {
    (0..text.len()).find_map(|i| {
        let candidate = text.get(i..i + 5)?;
        NaiveTime::parse_from_str(candidate, "%H:%M").ok()
    })
}
