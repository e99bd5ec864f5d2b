//! Human duration parsing and elapsed-time phrasing
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Word units ("2 hours"), decimals, months and years
//! - 1.0.0: Compact units ("30m", "1h30m")

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::core::ParseDurationError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Elapsed times shorter than this many minutes also show seconds
const SECONDS_PRECISION_MINUTES: i64 = 5;

const CATCH_UP_SUFFIX: &str = " (missed during outage)";

fn segment_regex() -> &'static Regex {
    static SEGMENT: OnceLock<Regex> = OnceLock::new();
    SEGMENT.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*([a-z]+)").expect("duration segment regex is valid")
    })
}

fn filler_regex() -> &'static Regex {
    static FILLER: OnceLock<Regex> = OnceLock::new();
    FILLER.get_or_init(|| Regex::new(r"^(?:[\s,]|and)*$").expect("duration filler regex is valid"))
}

/// Milliseconds per unit name
fn unit_millis(unit: &str) -> Option<f64> {
    let millis = match unit {
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => 1_000.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000.0,
        "d" | "day" | "days" => 86_400_000.0,
        "w" | "wk" | "wks" | "week" | "weeks" => 604_800_000.0,
        // 30 and 365 days
        "mo" | "mth" | "mths" | "month" | "months" => 2_592_000_000.0,
        "y" | "yr" | "yrs" | "year" | "years" => 31_536_000_000.0,
        _ => return None,
    };
    Some(millis)
}

/// Parse a human duration like "2 hours", "5m", "1h30m" or "1.5 days"
///
/// Segments may be separated by whitespace, commas or "and". Anything else
/// in the text is rejected rather than ignored.
pub fn parse_duration(text: &str) -> Result<Duration, ParseDurationError> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    let mut total_millis = 0.0_f64;
    let mut last_end = 0;
    let mut matched = false;

    for caps in segment_regex().captures_iter(&text) {
        let (Some(whole), Some(number), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        if !filler_regex().is_match(&text[last_end..whole.start()]) {
            return Err(ParseDurationError::Unrecognized(text.clone()));
        }
        last_end = whole.end();

        let value: f64 = number
            .as_str()
            .parse()
            .map_err(|_| ParseDurationError::Unrecognized(text.clone()))?;
        let per_unit = unit_millis(unit.as_str())
            .ok_or_else(|| ParseDurationError::UnknownUnit(unit.as_str().to_string()))?;

        total_millis += value * per_unit;
        matched = true;
    }

    if !matched || !filler_regex().is_match(&text[last_end..]) {
        return Err(ParseDurationError::Unrecognized(text));
    }

    if !total_millis.is_finite() || total_millis >= u64::MAX as f64 {
        return Err(ParseDurationError::Unrecognized(text));
    }
    Ok(Duration::from_millis(total_millis.round() as u64))
}

fn plural(value: i64, unit: &str) -> String {
    format!("{} {}{}", value, unit, if value == 1 { "" } else { "s" })
}

/// Render time since a reminder was created, largest unit first
///
/// Days, hours and minutes are always candidates; seconds only when less than
/// five whole minutes have elapsed. Units that truncate to zero are left out,
/// e.g. "2 hours 5 minutes" or "45 seconds".
pub fn format_elapsed(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let include_seconds = total / SECONDS_PER_MINUTE < SECONDS_PRECISION_MINUTES;

    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total % SECONDS_PER_MINUTE;

    let mut parts = Vec::new();
    for (value, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        if value != 0 {
            parts.push(plural(value, unit));
        }
    }
    if include_seconds && seconds != 0 {
        parts.push(plural(seconds, "second"));
    }

    if parts.is_empty() {
        return plural(0, "second");
    }
    parts.join(" ")
}

/// Text of the message delivered when a reminder fires
pub fn notification_text(elapsed: chrono::Duration, is_catch_up: bool) -> String {
    format!(
        "Reminder from {} ago{}",
        format_elapsed(elapsed),
        if is_catch_up { CATCH_UP_SUFFIX } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_parse_duration_compact() {
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Ok(Duration::from_secs(86400)));
        assert_eq!(parse_duration("1w"), Ok(Duration::from_secs(604800)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
    }

    #[test]
    fn test_parse_duration_words() {
        assert_eq!(parse_duration("2 hours"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1 Hour"), Ok(Duration::from_secs(3600)));
        assert_eq!(
            parse_duration("1 day, 2 hours and 3 minutes"),
            Ok(Duration::from_secs(86400 + 7200 + 180))
        );
        assert_eq!(parse_duration("  10 mins "), Ok(Duration::from_secs(600)));
    }

    #[test]
    fn test_parse_duration_decimals_and_long_units() {
        assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("1 month"), Ok(Duration::from_secs(30 * 86400)));
        assert_eq!(parse_duration("1y"), Ok(Duration::from_secs(365 * 86400)));
    }

    #[test]
    fn test_parse_duration_errors() {
        assert_eq!(parse_duration(""), Err(ParseDurationError::Empty));
        assert_eq!(parse_duration("   "), Err(ParseDurationError::Empty));
        assert_eq!(
            parse_duration("3 fortnights"),
            Err(ParseDurationError::UnknownUnit("fortnights".to_string()))
        );
        assert!(matches!(
            parse_duration("soon"),
            Err(ParseDurationError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_duration("5m please"),
            Err(ParseDurationError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_duration("42"),
            Err(ParseDurationError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_format_elapsed_hours_and_minutes() {
        let elapsed = ChronoDuration::hours(2) + ChronoDuration::minutes(5);
        assert_eq!(format_elapsed(elapsed), "2 hours 5 minutes");
    }

    #[test]
    fn test_format_elapsed_drops_seconds_past_five_minutes() {
        let elapsed = ChronoDuration::minutes(5) + ChronoDuration::seconds(30);
        assert_eq!(format_elapsed(elapsed), "5 minutes");

        let elapsed = ChronoDuration::hours(2) + ChronoDuration::seconds(59);
        assert_eq!(format_elapsed(elapsed), "2 hours");
    }

    #[test]
    fn test_format_elapsed_short() {
        assert_eq!(format_elapsed(ChronoDuration::seconds(45)), "45 seconds");
        assert_eq!(format_elapsed(ChronoDuration::seconds(1)), "1 second");
        assert_eq!(
            format_elapsed(ChronoDuration::seconds(4 * 60 + 59)),
            "4 minutes 59 seconds"
        );
        assert_eq!(format_elapsed(ChronoDuration::minutes(3)), "3 minutes");
    }

    #[test]
    fn test_format_elapsed_days() {
        let elapsed = ChronoDuration::days(1) + ChronoDuration::minutes(1);
        assert_eq!(format_elapsed(elapsed), "1 day 1 minute");
        assert_eq!(format_elapsed(ChronoDuration::days(3)), "3 days");
    }

    #[test]
    fn test_format_elapsed_zero_and_negative() {
        assert_eq!(format_elapsed(ChronoDuration::zero()), "0 seconds");
        assert_eq!(format_elapsed(ChronoDuration::milliseconds(900)), "0 seconds");
        assert_eq!(format_elapsed(ChronoDuration::seconds(-10)), "0 seconds");
    }

    #[test]
    fn test_notification_text() {
        let elapsed = ChronoDuration::hours(2) + ChronoDuration::minutes(5);
        assert_eq!(
            notification_text(elapsed, false),
            "Reminder from 2 hours 5 minutes ago"
        );
        assert_eq!(
            notification_text(ChronoDuration::seconds(45), true),
            "Reminder from 45 seconds ago (missed during outage)"
        );
    }
}
