use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::listing::filter::{filter_jobs, FilterError, FilterPatch, JobFilters};
use crate::models::job::Job;

/// Listing state: the current job order, the filter inputs, and the number of
/// refreshes still in flight.
#[derive(Debug)]
pub struct JobBoard {
    jobs: Vec<Job>,
    filters: JobFilters,
    locations: Vec<String>,
    pending_refreshes: usize,
}

impl JobBoard {
    pub fn new(dataset: Vec<Job>) -> Self {
        let mut locations: Vec<String> = Vec::new();
        for job in &dataset {
            if !locations.contains(&job.location) {
                locations.push(job.location.clone());
            }
        }
        Self {
            jobs: dataset,
            filters: JobFilters::default(),
            locations,
            pending_refreshes: 0,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    /// Distinct dataset locations in first-seen order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn is_refreshing(&self) -> bool {
        self.pending_refreshes > 0
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Job> {
        filter_jobs(&self.jobs, &self.filters, now)
    }

    pub fn update_filters(&mut self, patch: FilterPatch) -> Result<(), FilterError> {
        self.filters.apply(patch)?;
        debug!(filters = ?self.filters, "job filters updated");
        Ok(())
    }

    /// Resets every filter input. The job order is left as is.
    pub fn clear_filters(&mut self) {
        self.filters = JobFilters::default();
    }

    pub fn begin_refresh(&mut self) {
        self.pending_refreshes += 1;
    }

    /// Completes one refresh by reordering the current sequence. Membership
    /// never changes. Each completion reshuffles whatever order is current,
    /// so overlapping refreshes resolve last-write-wins.
    pub fn finish_refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.jobs.shuffle(rng);
        self.pending_refreshes = self.pending_refreshes.saturating_sub(1);
    }
}

/// Simulated "fetch new postings". Marks the board as refreshing, then spawns
/// a task that waits `delay` and reorders the board. No lock is held while
/// waiting and there is no cancellation.
pub async fn start_refresh(board: &Arc<RwLock<JobBoard>>, delay: Duration) -> JoinHandle<()> {
    board.write().await.begin_refresh();
    let board = Arc::clone(board);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let mut board = board.write().await;
        let mut rng = rand::thread_rng();
        board.finish_refresh(&mut rng);
        info!(jobs = board.jobs().len(), "job listing refreshed");
    })
}

/// Waits for a refresh task and reports whether it ran to completion. A
/// panicked or aborted task is logged.
pub async fn join_refresh(task: JoinHandle<()>) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            error!("job listing refresh task failed: {e}");
            false
        }
    }
}
