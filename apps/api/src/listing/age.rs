use chrono::{DateTime, Utc};

use crate::models::job::Job;

/// Fixed-length unit approximations, largest first.
const UNITS: &[(f64, &str)] = &[
    (31_536_000.0, "years"),
    (2_592_000.0, "months"),
    (86_400.0, "days"),
    (3_600.0, "hours"),
    (60.0, "minutes"),
];

/// Human "time ago" label: the first unit of which more than one has
/// elapsed, floored, otherwise whole seconds.
pub fn age_label(posted: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - posted).num_seconds();
    for (unit_secs, unit) in UNITS {
        let interval = seconds as f64 / unit_secs;
        if interval > 1.0 {
            return format!("{} {unit} ago", interval.floor() as i64);
        }
    }
    format!("{seconds} seconds ago")
}

/// Label for a listed job; `"unknown"` when its timestamp does not parse.
pub fn job_age_label(job: &Job, now: DateTime<Utc>) -> String {
    job.posted_at()
        .map(|posted| age_label(posted, now))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn label(ago: Duration) -> String {
        age_label(now() - ago, now())
    }

    #[test]
    fn test_picks_largest_unit() {
        assert_eq!(label(Duration::days(800)), "2 years ago");
        assert_eq!(label(Duration::days(65)), "2 months ago");
        assert_eq!(label(Duration::days(10)), "10 days ago");
        assert_eq!(label(Duration::hours(5)), "5 hours ago");
        assert_eq!(label(Duration::minutes(7)), "7 minutes ago");
        assert_eq!(label(Duration::seconds(42)), "42 seconds ago");
    }

    #[test]
    fn test_threshold_is_strictly_greater_than_one() {
        // exactly one day is not "> 1 day", so it falls through to hours
        assert_eq!(label(Duration::days(1)), "24 hours ago");
        assert_eq!(label(Duration::minutes(1)), "60 seconds ago");
        assert_eq!(label(Duration::hours(36)), "1 days ago");
    }

    #[test]
    fn test_month_is_thirty_days() {
        assert_eq!(label(Duration::days(30)), "30 days ago");
        assert_eq!(label(Duration::days(31)), "1 months ago");
    }

    #[test]
    fn test_job_label_unknown_when_unparseable() {
        let job = Job {
            id: "1".to_string(),
            title: "T".to_string(),
            description: String::new(),
            location: "Remote".to_string(),
            date_time: "soon".to_string(),
            apply_link: None,
        };
        assert_eq!(job_age_label(&job, now()), "unknown");
    }
}
