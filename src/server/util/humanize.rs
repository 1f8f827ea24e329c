use chrono::{DateTime, Utc};

const UNITS: [(&str, i64); 7] = [
    ("year", 365 * 24 * 3600),
    ("month", 30 * 24 * 3600),
    ("week", 7 * 24 * 3600),
    ("day", 24 * 3600),
    ("hour", 3600),
    ("minute", 60),
    ("second", 1),
];

/// Relative description of `then` as seen from `now`, e.g. `"3 days ago"`.
pub fn diff_for_humans(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(*then).num_seconds();
    let seconds = delta.abs();

    let (unit, count) = UNITS
        .iter()
        .find(|(_, size)| seconds >= *size)
        .map(|(unit, size)| (*unit, seconds / size))
        .unwrap_or(("second", 1));

    let plural = if count == 1 { "" } else { "s" };
    let suffix = if delta >= 0 { "ago" } else { "from now" };

    format!("{} {}{} {}", count, unit, plural, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn describes_past_and_future() {
        let now = Utc::now();

        assert_eq!(diff_for_humans(&(now - Duration::days(3)), &now), "3 days ago");
        assert_eq!(diff_for_humans(&(now - Duration::hours(1)), &now), "1 hour ago");
        assert_eq!(diff_for_humans(&now, &now), "1 second ago");
        assert_eq!(
            diff_for_humans(&(now + Duration::minutes(5)), &now),
            "5 minutes from now"
        );
    }
}
