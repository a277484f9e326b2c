// Relative time formatting for ticket timestamps.

use chrono::{DateTime, TimeDelta, Utc};

/// Format a timestamp as a short human-readable age relative to `now`.
///
/// Under a minute (or in the future) is "just now"; beyond that the largest
/// whole unit wins: minutes, hours, days, then weeks without bound.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - timestamp;
    if diff < TimeDelta::minutes(1) {
        return "just now".to_string();
    }
    if diff < TimeDelta::hours(1) {
        return format!("{}m ago", diff.num_minutes());
    }
    if diff < TimeDelta::days(1) {
        return format!("{}h ago", diff.num_hours());
    }
    if diff < TimeDelta::weeks(1) {
        return format!("{}d ago", diff.num_days());
    }
    format!("{}w ago", diff.num_weeks())
}

/// [`format_relative_time`] against the current instant.
pub fn format_relative_time_now(timestamp: DateTime<Utc>) -> String {
    format_relative_time(timestamp, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_future_is_just_now() {
        assert_eq!(
            format_relative_time(now() + TimeDelta::minutes(5), now()),
            "just now"
        );
    }

    #[test]
    fn test_under_a_minute_is_just_now() {
        assert_eq!(
            format_relative_time(now() - TimeDelta::seconds(59), now()),
            "just now"
        );
    }

    #[test]
    fn test_minutes() {
        assert_eq!(format_relative_time(now() - TimeDelta::minutes(1), now()), "1m ago");
        assert_eq!(format_relative_time(now() - TimeDelta::minutes(59), now()), "59m ago");
    }

    #[test]
    fn test_hours() {
        assert_eq!(format_relative_time(now() - TimeDelta::hours(1), now()), "1h ago");
        assert_eq!(format_relative_time(now() - TimeDelta::hours(23), now()), "23h ago");
    }

    #[test]
    fn test_days() {
        assert_eq!(format_relative_time(now() - TimeDelta::days(1), now()), "1d ago");
        assert_eq!(format_relative_time(now() - TimeDelta::days(6), now()), "6d ago");
    }

    #[test]
    fn test_weeks_without_bound() {
        assert_eq!(format_relative_time(now() - TimeDelta::weeks(1), now()), "1w ago");
        assert_eq!(format_relative_time(now() - TimeDelta::weeks(52), now()), "52w ago");
    }

    #[test]
    fn test_truncates_partial_units() {
        assert_eq!(
            format_relative_time(now() - TimeDelta::minutes(90), now()),
            "1h ago"
        );
    }
}
