use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting as loaded from the seed dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Posting timestamp as supplied by the dataset. Kept verbatim so that a
    /// malformed value never blocks loading; see [`Job::posted_at`].
    #[serde(alias = "dateTime")]
    pub date_time: String,
    #[serde(default, alias = "applyLink", skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
}

/// Zone-less timestamp layouts accepted after RFC 3339, read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

impl Job {
    /// Parses `date_time` as RFC 3339, then as a zone-less ISO timestamp
    /// (seconds with optional fraction, or minutes), then as a bare
    /// `YYYY-MM-DD` at midnight. Zone-less values are UTC. `None` when
    /// nothing matches.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date_time.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }
}
