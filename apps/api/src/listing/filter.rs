use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::job::Job;

/// Recency cutoff for the "date posted" filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateWindow {
    Day,
    Week,
    Month,
}

impl DateWindow {
    pub fn span(&self) -> Duration {
        match self {
            DateWindow::Day => Duration::hours(24),
            DateWindow::Week => Duration::days(7),
            DateWindow::Month => Duration::days(30),
        }
    }

    /// True when `posted` lies in `[now - span, now]`.
    pub fn contains(&self, posted: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        posted >= now - self.span() && posted <= now
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("unknown date window '{0}' (expected day, week or month)")]
    UnknownWindow(String),
}

impl FromStr for DateWindow {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(DateWindow::Day),
            "week" => Ok(DateWindow::Week),
            "month" => Ok(DateWindow::Month),
            other => Err(FilterError::UnknownWindow(other.to_string())),
        }
    }
}

/// The three filter inputs. The default is "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobFilters {
    pub search: String,
    pub location: Option<String>,
    pub posted_within: Option<DateWindow>,
}

/// Partial filter update. A missing field leaves that input alone; an empty
/// string unsets it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub location: Option<String>,
    pub posted_within: Option<String>,
}

impl JobFilters {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.location.is_some() || self.posted_within.is_some()
    }

    /// Applies `patch` atomically: on error nothing changes.
    pub fn apply(&mut self, patch: FilterPatch) -> Result<(), FilterError> {
        let window = match patch.posted_within.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(token) => Some(Some(token.parse::<DateWindow>()?)),
        };

        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(location) = patch.location {
            self.location = Some(location).filter(|l| !l.is_empty());
        }
        if let Some(window) = window {
            self.posted_within = window;
        }
        Ok(())
    }

    /// All three predicates must hold. A job whose timestamp does not parse
    /// never passes an active date window.
    pub fn matches(&self, job: &Job, now: DateTime<Utc>) -> bool {
        self.matches_search(job) && self.matches_location(job) && self.matches_window(job, now)
    }

    fn matches_search(&self, job: &Job) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        job.title.to_lowercase().contains(&needle)
            || job.description.to_lowercase().contains(&needle)
    }

    fn matches_location(&self, job: &Job) -> bool {
        self.location
            .as_deref()
            .map_or(true, |location| job.location == location)
    }

    fn matches_window(&self, job: &Job, now: DateTime<Utc>) -> bool {
        match self.posted_within {
            None => true,
            Some(window) => job
                .posted_at()
                .is_some_and(|posted| window.contains(posted, now)),
        }
    }
}

/// The filtered view: an order-preserving subsequence of `jobs`.
pub fn filter_jobs<'a>(jobs: &'a [Job], filters: &JobFilters, now: DateTime<Utc>) -> Vec<&'a Job> {
    jobs.iter().filter(|job| filters.matches(job, now)).collect()
}
