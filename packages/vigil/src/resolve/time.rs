//! Incident-time resolution in the fixed civil time zone.
//!
//! All persisted and displayed times use South African Standard Time
//! (Africa/Johannesburg, UTC+2, no DST), modeled as a fixed offset.
//! Unparseable input resolves to "now" rather than failing — a malformed
//! time phrase never blocks a commit.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;

/// The single civil zone used throughout the system (SAST, UTC+2).
pub static CIVIL_ZONE: LazyLock<FixedOffset> =
    LazyLock::new(|| FixedOffset::east_opt(2 * 3600).unwrap());

/// Current instant in the civil zone.
pub fn now_civil() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&*CIVIL_ZONE)
}

static AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(sec|secs|second|seconds|min|mins|minute|minutes|hr|hrs|hour|hours)\s*(?:ago)?$")
        .unwrap()
});

static YESTERDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:yesterday|last\s+night)\s*(\d{1,2}:\d{2})?$").unwrap()
});

static TODAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^today\s*(\d{1,2}:\d{2})?$").unwrap());

/// Resolve a raw time phrase against an explicit "now".
///
/// Accepted inputs: the literal "now"/"right now", `<N> sec/min/hour(s)
/// [ago]`, `yesterday [HH:MM]` (and "last night", from the extractor's bare
/// keywords), `today [HH:MM]`, ISO-8601, and a small set of best-effort
/// calendar formats. `None` and anything unparseable resolve to `now`.
pub fn resolve_with_now(
    raw: Option<&str>,
    now: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    let Some(raw) = raw else { return now };
    let text = raw.trim();
    if text.is_empty() {
        return now;
    }
    let lower = text.to_lowercase();

    if lower == "now" || lower == "right now" {
        return now;
    }

    if let Some(caps) = AGO.captures(&lower) {
        let amount: i64 = caps[1].parse().unwrap_or(0);
        let delta = match &caps[2][..3.min(caps[2].len())] {
            "sec" => Duration::seconds(amount),
            "min" => Duration::minutes(amount),
            _ => Duration::hours(amount),
        };
        return now - delta;
    }

    if let Some(caps) = YESTERDAY.captures(&lower) {
        let date = now.date_naive() - Duration::days(1);
        return at_time_of_day(date, caps.get(1).map(|m| m.as_str()), now);
    }

    if let Some(caps) = TODAY.captures(&lower) {
        return at_time_of_day(now.date_naive(), caps.get(1).map(|m| m.as_str()), now);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return parsed.with_timezone(&*CIVIL_ZONE);
    }

    // Best-effort calendar formats, interpreted in the civil zone
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, format) {
            if let Some(resolved) = CIVIL_ZONE.from_local_datetime(&naive).single() {
                return resolved;
            }
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return at_time_of_day(date, Some("00:00"), now);
    }
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M") {
        if let Some(resolved) = CIVIL_ZONE
            .from_local_datetime(&now.date_naive().and_time(time))
            .single()
        {
            return resolved;
        }
    }

    tracing::debug!(raw = %text, "unparseable time phrase, resolving to now");
    now
}

/// Resolve against the real clock.
pub fn resolve(raw: Option<&str>) -> DateTime<FixedOffset> {
    resolve_with_now(raw, now_civil())
}

/// Combine a date with an optional HH:MM, falling back to now's time of day.
fn at_time_of_day(
    date: NaiveDate,
    time: Option<&str>,
    now: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    let time_of_day = time
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
        .unwrap_or_else(|| now.time());
    CIVIL_ZONE
        .from_local_datetime(&date.and_time(time_of_day))
        .single()
        .unwrap_or(now)
}

/// Humanize an instant relative to now ("3 hours ago"), for report lists.
pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(instant);
    let seconds = delta.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = delta.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = delta.num_days();
    if days < 31 {
        return plural(days, "day");
    }
    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<FixedOffset> {
        // 2024-06-10 09:30:00 +02:00
        CIVIL_ZONE
            .with_ymd_and_hms(2024, 6, 10, 9, 30, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn none_and_now_resolve_to_now() {
        let now = fixed_now();
        assert_eq!(resolve_with_now(None, now), now);
        assert_eq!(resolve_with_now(Some("now"), now), now);
        assert_eq!(resolve_with_now(Some("Right Now"), now), now);
    }

    #[test]
    fn relative_ago_phrases() {
        let now = fixed_now();
        assert_eq!(
            resolve_with_now(Some("45 minutes ago"), now),
            now - Duration::minutes(45)
        );
        assert_eq!(resolve_with_now(Some("2 hrs"), now), now - Duration::hours(2));
        assert_eq!(
            resolve_with_now(Some("30 secs ago"), now),
            now - Duration::seconds(30)
        );
    }

    #[test]
    fn yesterday_with_time_of_day() {
        let now = fixed_now();
        let resolved = resolve_with_now(Some("yesterday 21:00"), now);
        assert_eq!(
            resolved,
            CIVIL_ZONE
                .with_ymd_and_hms(2024, 6, 9, 21, 0, 0)
                .single()
                .unwrap()
        );
    }

    #[test]
    fn bare_yesterday_keeps_current_time_of_day() {
        let now = fixed_now();
        let resolved = resolve_with_now(Some("yesterday"), now);
        assert_eq!(
            resolved,
            CIVIL_ZONE
                .with_ymd_and_hms(2024, 6, 9, 9, 30, 0)
                .single()
                .unwrap()
        );
    }

    #[test]
    fn iso_strings_reinterpret_in_civil_zone() {
        let now = fixed_now();
        let resolved = resolve_with_now(Some("2024-01-15T08:00:00Z"), now);
        assert_eq!(resolved.offset(), &*CIVIL_ZONE);
        assert_eq!(
            resolved,
            CIVIL_ZONE
                .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
                .single()
                .unwrap()
        );
    }

    #[test]
    fn unparseable_resolves_to_now() {
        let now = fixed_now();
        assert_eq!(resolve_with_now(Some("the other day maybe"), now), now);
    }

    #[test]
    fn relative_formatting() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::seconds(5), now), "just now");
        assert_eq!(
            format_relative(now - Duration::minutes(3), now),
            "3 minutes ago"
        );
        assert_eq!(format_relative(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2 days ago");
    }
}
