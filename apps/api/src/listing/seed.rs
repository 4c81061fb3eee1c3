use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::models::job::Job;

/// Dataset compiled into the binary, used when no seed path is configured.
const BUNDLED_SEED: &str = include_str!("../../seed/jobs.json");

/// Loads the job dataset from `path`, or the bundled seed when `None`.
/// Fails on unreadable files, malformed JSON, or duplicate job ids.
pub fn load_jobs(path: Option<&Path>) -> Result<Vec<Job>> {
    let jobs = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job seed '{}'", path.display()))?;
            parse_jobs(&raw).with_context(|| format!("Invalid job seed '{}'", path.display()))?
        }
        None => parse_jobs(BUNDLED_SEED).context("Invalid bundled job seed")?,
    };

    info!(
        count = jobs.len(),
        source = %path.map_or("bundled".to_string(), |p| p.display().to_string()),
        "Job dataset loaded"
    );
    Ok(jobs)
}

fn parse_jobs(raw: &str) -> Result<Vec<Job>> {
    let jobs: Vec<Job> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for job in &jobs {
        if !seen.insert(job.id.as_str()) {
            bail!("Duplicate job id '{}'", job.id);
        }
    }
    Ok(jobs)
}
