//! Time formatting for token expiry.

use chrono::{DateTime, Utc};

/// Format how long until `target`, e.g. `in 42m`. Past targets read `expired`.
#[must_use]
pub fn format_countdown(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = target.signed_duration_since(now);
    if remaining.num_seconds() <= 0 {
        return "expired".to_string();
    }

    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;

    if hours >= 24 {
        let days = hours / 24;
        format!("in {days} day{}", if days == 1 { "" } else { "s" })
    } else if hours > 0 {
        format!("in {hours}h {minutes}m")
    } else if minutes > 0 {
        format!("in {minutes}m")
    } else {
        format!("in {}s", remaining.num_seconds())
    }
}

/// Describe an expiry relative to `now`: `expires in 59m` or `expired 3 hours ago`.
#[must_use]
pub fn describe_expiry(expires: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if expires > now {
        return format!("expires {}", format_countdown(expires, now));
    }

    let elapsed = now.signed_duration_since(expires);
    let (value, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "expired just now".to_string();
    };
    format!("expired {value} {unit}{} ago", if value == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn countdown_units() {
        let now = Utc::now();
        assert_eq!(format_countdown(now + Duration::minutes(59), now), "in 59m");
        assert_eq!(
            format_countdown(now + Duration::hours(3) + Duration::minutes(30), now),
            "in 3h 30m"
        );
        assert_eq!(format_countdown(now + Duration::days(3), now), "in 3 days");
        assert_eq!(format_countdown(now + Duration::seconds(20), now), "in 20s");
    }

    #[test]
    fn countdown_at_expiry_is_expired() {
        let now = Utc::now();
        assert_eq!(format_countdown(now, now), "expired");
    }

    #[test]
    fn expiry_descriptions() {
        let now = Utc::now();
        assert_eq!(describe_expiry(now + Duration::minutes(5), now), "expires in 5m");
        assert_eq!(describe_expiry(now - Duration::hours(1), now), "expired 1 hour ago");
        assert_eq!(describe_expiry(now - Duration::days(2), now), "expired 2 days ago");
        assert_eq!(describe_expiry(now - Duration::seconds(5), now), "expired just now");
    }
}
