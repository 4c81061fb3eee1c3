//! Render-to-document export: rendered preview → raster capture → PDF.
//!
//! Rasterizing HTML is delegated to an external capability behind the
//! [`Rasterizer`] trait. `AppState` holds an optional `Arc<dyn Rasterizer>`;
//! without one, export is a logged no-op and no job is created.
//! Export jobs run as detached tasks with no cancellation. The registry keeps
//! at most [`MAX_RETAINED_EXPORTS`] jobs; starting one more evicts the oldest.

pub mod command;
pub mod handlers;
pub mod pdf;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::export::pdf::{decode_png, image_pdf};

/// Download name of every exported CV.
pub const EXPORT_FILENAME: &str = "cv.pdf";

/// Upper bound on export jobs (and their PDFs) held in memory.
pub const MAX_RETAINED_EXPORTS: usize = 16;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("rasterizer exited with {status}: {stderr}")]
    RasterizerFailed { status: String, stderr: String },

    #[error("invalid raster image: {0}")]
    Image(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

/// Turns a standalone HTML page into PNG bytes.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Runs the full pipeline for one HTML snapshot.
pub async fn export_pdf(rasterizer: &dyn Rasterizer, html: &str) -> Result<Vec<u8>, ExportError> {
    let png = rasterizer.rasterize(html).await?;
    let image = decode_png(&png)?;
    image_pdf(&image)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Pending,
    Ready,
    Failed,
    /// No rasterizer configured; nothing was started.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportJob {
    pub id: Uuid,
    pub status: ExportStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub pdf: Option<Bytes>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportTicket {
    pub export_id: Option<Uuid>,
    pub status: ExportStatus,
}

#[derive(Clone)]
pub struct ExportService {
    rasterizer: Option<Arc<dyn Rasterizer>>,
    jobs: Arc<RwLock<HashMap<Uuid, ExportJob>>>,
}

impl ExportService {
    pub fn new(rasterizer: Option<Arc<dyn Rasterizer>>) -> Self {
        Self {
            rasterizer,
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn is_available(&self) -> bool {
        self.rasterizer.is_some()
    }

    /// Starts exporting `html` in the background. Returns a `Skipped` ticket
    /// without an id when no rasterizer is configured.
    pub async fn start(&self, html: String) -> ExportTicket {
        let Some(rasterizer) = self.rasterizer.clone() else {
            info!("CV export skipped: no rasterizer configured");
            return ExportTicket {
                export_id: None,
                status: ExportStatus::Skipped,
            };
        };

        let id = Uuid::new_v4();
        let mut jobs = self.jobs.write().await;
        evict_oldest(&mut jobs, MAX_RETAINED_EXPORTS - 1);
        jobs.insert(
            id,
            ExportJob {
                id,
                status: ExportStatus::Pending,
                error: None,
                created_at: Utc::now(),
                finished_at: None,
                pdf: None,
            },
        );
        drop(jobs);
        info!(export_id = %id, "CV export started");

        let jobs = Arc::clone(&self.jobs);
        tokio::spawn(async move {
            let result = export_pdf(rasterizer.as_ref(), &html).await;

            let mut jobs = jobs.write().await;
            let Some(job) = jobs.get_mut(&id) else {
                return;
            };
            job.finished_at = Some(Utc::now());
            match result {
                Ok(pdf) => {
                    info!(export_id = %id, bytes = pdf.len(), "CV export ready");
                    job.status = ExportStatus::Ready;
                    job.pdf = Some(Bytes::from(pdf));
                }
                Err(e) => {
                    error!(export_id = %id, "CV export failed: {e}");
                    job.status = ExportStatus::Failed;
                    job.error = Some(e.to_string());
                }
            }
        });

        ExportTicket {
            export_id: Some(id),
            status: ExportStatus::Pending,
        }
    }

    pub async fn job(&self, id: Uuid) -> Option<ExportJob> {
        self.jobs.read().await.get(&id).cloned()
    }
}

/// Drops the oldest jobs by `created_at` until at most `keep` remain. An
/// evicted job that is still running finishes without being recorded.
fn evict_oldest(jobs: &mut HashMap<Uuid, ExportJob>, keep: usize) {
    while jobs.len() > keep {
        let Some(oldest) = jobs
            .values()
            .min_by_key(|job| job.created_at)
            .map(|job| job.id)
        else {
            return;
        };
        jobs.remove(&oldest);
        debug!(export_id = %oldest, "evicted export job");
    }
}
