//! Timestamp rendering for buffered entries
//!
//! Entries are stored in UTC and rendered in a caller-chosen IANA timezone,
//! either relative to "now" (`"3m 12s ago"`) or as an exact RFC 822 style
//! timestamp (`"08 Jan 25 10:30 UTC"`). Timezone lookup never fails: an empty
//! or unknown name renders in UTC.

use super::error::{Result, TracerError};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// strftime pattern for exact timestamps: `02 Jan 06 15:04 MST`
pub const EXACT_TIME_FORMAT: &str = "%d %b %y %H:%M %Z";

/// How the time part of a rendered entry is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeDisplay {
    /// `"12s ago"`, `"4m 2s ago"`, `"3h 5m ago"`, falling back to the exact
    /// form once an entry is a day old.
    #[default]
    Relative,

    /// Always the exact form.
    Exact,
}

impl TimeDisplay {
    pub fn from_exact(exact: bool) -> Self {
        if exact {
            TimeDisplay::Exact
        } else {
            TimeDisplay::Relative
        }
    }

    /// Render `time` as seen from `now` in timezone `tz`
    #[must_use]
    pub fn render(&self, time: &DateTime<Utc>, tz: Tz, now: &DateTime<Utc>) -> String {
        match self {
            TimeDisplay::Relative => format_time_ago(time, tz, now),
            TimeDisplay::Exact => format_exact(time, tz),
        }
    }
}

/// Parse an IANA timezone name, rejecting unknown names
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TracerError::timezone(name))
}

/// Resolve a timezone name, falling back to UTC when it is empty or unknown
#[must_use]
pub fn resolve_timezone(name: &str) -> Tz {
    if name.is_empty() {
        return Tz::UTC;
    }
    parse_timezone(name).unwrap_or(Tz::UTC)
}

/// Exact timestamp in the given zone
#[must_use]
pub fn format_exact(time: &DateTime<Utc>, tz: Tz) -> String {
    time.with_timezone(&tz).format(EXACT_TIME_FORMAT).to_string()
}

/// Relative age of `time` as seen from `now`
///
/// Entries from the future (clock skew) count as `0s ago`.
#[must_use]
pub fn format_time_ago(time: &DateTime<Utc>, tz: Tz, now: &DateTime<Utc>) -> String {
    let elapsed = (*now - *time).num_seconds().max(0);

    if elapsed < 60 {
        format!("{}s ago", elapsed)
    } else if elapsed < 3600 {
        format!("{}m {}s ago", elapsed / 60, elapsed % 60)
    } else if elapsed < 86_400 {
        let hours = elapsed / 3600;
        let minutes = (elapsed / 60) % 60;
        if minutes == 0 {
            format!("{}h ago", hours)
        } else {
            format!("{}h {}m ago", hours, minutes)
        }
    } else {
        format_exact(time, tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_resolve_known_timezone() {
        assert_eq!(resolve_timezone("Europe/Berlin"), Tz::Europe__Berlin);
        assert_eq!(resolve_timezone("UTC"), Tz::UTC);
    }

    #[test]
    fn test_resolve_falls_back_to_utc() {
        assert_eq!(resolve_timezone(""), Tz::UTC);
        assert_eq!(resolve_timezone("Not/AZone"), Tz::UTC);
        assert!(parse_timezone("Not/AZone").is_err());
    }

    #[test]
    fn test_exact_format_utc() {
        assert_eq!(format_exact(&fixed_datetime(), Tz::UTC), "08 Jan 25 10:30 UTC");
    }

    #[test]
    fn test_exact_format_other_zone() {
        // Berlin is UTC+1 in January
        let rendered = format_exact(&fixed_datetime(), Tz::Europe__Berlin);
        assert_eq!(rendered, "08 Jan 25 11:30 CET");
    }

    #[test]
    fn test_seconds_ago() {
        let time = fixed_datetime();
        let now = time + Duration::seconds(42);
        assert_eq!(format_time_ago(&time, Tz::UTC, &now), "42s ago");
    }

    #[test]
    fn test_minutes_ago() {
        let time = fixed_datetime();
        let now = time + Duration::seconds(3 * 60 + 7);
        assert_eq!(format_time_ago(&time, Tz::UTC, &now), "3m 7s ago");
    }

    #[test]
    fn test_hours_ago() {
        let time = fixed_datetime();
        assert_eq!(
            format_time_ago(&time, Tz::UTC, &(time + Duration::hours(2))),
            "2h ago"
        );
        assert_eq!(
            format_time_ago(&time, Tz::UTC, &(time + Duration::minutes(125))),
            "2h 5m ago"
        );
    }

    #[test]
    fn test_day_old_uses_exact_format() {
        let time = fixed_datetime();
        let now = time + Duration::days(2);
        assert_eq!(format_time_ago(&time, Tz::UTC, &now), "08 Jan 25 10:30 UTC");
    }

    #[test]
    fn test_future_time_is_zero_seconds() {
        let time = fixed_datetime();
        let now = time - Duration::seconds(5);
        assert_eq!(format_time_ago(&time, Tz::UTC, &now), "0s ago");
    }

    #[test]
    fn test_time_display_render() {
        let time = fixed_datetime();
        let now = time + Duration::seconds(1);
        assert_eq!(TimeDisplay::from_exact(false).render(&time, Tz::UTC, &now), "1s ago");
        assert_eq!(
            TimeDisplay::from_exact(true).render(&time, Tz::UTC, &now),
            "08 Jan 25 10:30 UTC"
        );
    }
}
