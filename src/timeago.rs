/// Relative timestamp labels for the feed ("3 hours ago"). Buckets and
/// rounding follow the thresholds the feed has always displayed: 45 seconds
/// round up to a minute, 45 minutes to an hour, 22 hours to a day, 26 days
/// to a month, 11 months to a year.
pub fn fmt_relative(then_ms: u64, now_ms: u64) -> String {
    let seconds = now_ms.saturating_sub(then_ms) / 1000;
    let minutes = round_div(seconds, 60);
    let hours = round_div(seconds, 60 * 60);
    let days = round_div(seconds, 60 * 60 * 24);
    let months = round_div(seconds, 60 * 60 * 24 * 30);

    if seconds < 45 {
        "a few seconds ago".to_string()
    } else if seconds < 90 {
        "a minute ago".to_string()
    } else if minutes < 45 {
        format!("{} minutes ago", minutes)
    } else if minutes < 90 {
        "an hour ago".to_string()
    } else if hours < 22 {
        format!("{} hours ago", hours)
    } else if hours < 36 {
        "a day ago".to_string()
    } else if days < 26 {
        format!("{} days ago", days)
    } else if days < 46 {
        "a month ago".to_string()
    } else if months < 11 {
        format!("{} months ago", months)
    } else if months < 18 {
        "a year ago".to_string()
    } else {
        // Deriving years from the month count keeps the two buckets
        // consistent: anything past the "a year ago" cutoff rounds to at
        // least 2, so the plural form never reads "1 years ago".
        format!("{} years ago", round_div(months, 12))
    }
}

fn round_div(n: u64, d: u64) -> u64 {
    (n + d / 2) / d
}

#[cfg(test)]
mod test {
    use super::*;

    const SEC: u64 = 1000;
    const MIN: u64 = 60 * SEC;
    const HOUR: u64 = 60 * MIN;
    const DAY: u64 = 24 * HOUR;

    fn ago(delta: u64) -> String {
        let now = 1_700_000_000_000;
        fmt_relative(now - delta, now)
    }

    #[test]
    fn seconds_bucket() {
        assert_eq!(ago(0), "a few seconds ago");
        assert_eq!(ago(44 * SEC), "a few seconds ago");
        assert_eq!(ago(45 * SEC), "a minute ago");
        assert_eq!(ago(89 * SEC), "a minute ago");
    }

    #[test]
    fn minutes_and_hours() {
        assert_eq!(ago(90 * SEC), "2 minutes ago");
        assert_eq!(ago(30 * MIN), "30 minutes ago");
        assert_eq!(ago(44 * MIN), "44 minutes ago");
        assert_eq!(ago(45 * MIN), "an hour ago");
        assert_eq!(ago(89 * MIN), "an hour ago");
        assert_eq!(ago(3 * HOUR), "3 hours ago");
        assert_eq!(ago(21 * HOUR), "21 hours ago");
    }

    #[test]
    fn days_and_beyond() {
        assert_eq!(ago(22 * HOUR), "a day ago");
        assert_eq!(ago(35 * HOUR), "a day ago");
        assert_eq!(ago(3 * DAY), "3 days ago");
        assert_eq!(ago(25 * DAY), "25 days ago");
        assert_eq!(ago(26 * DAY), "a month ago");
        assert_eq!(ago(45 * DAY), "a month ago");
        assert_eq!(ago(90 * DAY), "3 months ago");
        assert_eq!(ago(360 * DAY), "a year ago");
        assert_eq!(ago(800 * DAY), "2 years ago");
    }

    #[test]
    fn year_bucket_boundary() {
        // 524 days rounds to 17 months, the last of the singular bucket;
        // from 18 months the label must jump straight to the plural form,
        // never "1 years ago".
        assert_eq!(ago(524 * DAY), "a year ago");
        assert_eq!(ago(540 * DAY), "2 years ago");
        assert_eq!(ago(547 * DAY), "2 years ago");
    }

    #[test]
    fn clock_skew_clamps() {
        let now = 1_700_000_000_000;
        assert_eq!(fmt_relative(now + 10 * SEC, now), "a few seconds ago");
    }
}
