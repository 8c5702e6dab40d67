//! Human-readable review times.

use crate::models::Timestamp;
use chrono::DateTime;

/// Describes a signed number of seconds until (positive) or since
/// (negative) a review, e.g. "next review in 1 hour and 5 seconds" or
/// "2 days, 3 hours, 4 minutes and 5 seconds ago".
pub fn format_time_remaining(secs: i64) -> String {
    if secs == 0 {
        return "now".to_string();
    }

    let total = secs.unsigned_abs();
    let seconds = total % 60;
    let minutes = total / 60 % 60;
    let hours = total / 3_600 % 24;
    let days = total / 86_400;

    let mut parts = Vec::new();
    for (amount, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        if amount > 0 {
            parts.push(plural(amount, unit));
        }
    }
    // Zero seconds are left out unless nothing else was printed
    if seconds > 0 || parts.is_empty() {
        parts.push(plural(seconds, "second"));
    }

    let joined = match parts.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    };

    if secs < 0 {
        format!("{joined} ago")
    } else {
        format!("next review in {joined}")
    }
}

fn plural(amount: u64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}

/// Formats a timestamp as YYYY-MM-DD HH:MM in UTC.
pub fn format_timestamp(ts: Timestamp) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => format!("@{ts}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    #[test]
    fn test_zero_is_now() {
        assert_eq!(format_time_remaining(0), "now");
    }

    #[test]
    fn test_single_units() {
        assert_eq!(format_time_remaining(1), "next review in 1 second");
        assert_eq!(format_time_remaining(5), "next review in 5 seconds");
        assert_eq!(format_time_remaining(MINUTE), "next review in 1 minute");
        assert_eq!(format_time_remaining(HOUR), "next review in 1 hour");
        assert_eq!(format_time_remaining(DAY), "next review in 1 day");
    }

    #[test]
    fn test_past_times() {
        assert_eq!(format_time_remaining(-1), "1 second ago");
        assert_eq!(format_time_remaining(-DAY), "1 day ago");
        assert_eq!(
            format_time_remaining(-(2 * DAY + 3 * HOUR + 4 * MINUTE + 5)),
            "2 days, 3 hours, 4 minutes and 5 seconds ago"
        );
    }

    #[test]
    fn test_combinations() {
        assert_eq!(format_time_remaining(MINUTE + 1), "next review in 1 minute and 1 second");
        assert_eq!(
            format_time_remaining(HOUR + MINUTE + 1),
            "next review in 1 hour, 1 minute and 1 second"
        );
        assert_eq!(
            format_time_remaining(2 * DAY + 3 * HOUR + 4 * MINUTE + 5),
            "next review in 2 days, 3 hours, 4 minutes and 5 seconds"
        );
        // zero parts in between are skipped
        assert_eq!(format_time_remaining(DAY + 5), "next review in 1 day and 5 seconds");
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        assert!(format_time_remaining(i64::MIN).ends_with(" ago"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_678_886_400), "2023-03-15 13:20 UTC");
        assert_eq!(format_timestamp(1_672_531_200), "2023-01-01 00:00 UTC");
        assert_eq!(format_timestamp(i64::MAX), format!("@{}", i64::MAX));
    }
}
