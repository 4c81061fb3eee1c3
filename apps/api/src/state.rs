use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::editor::CvEditor;
use crate::export::ExportService;
use crate::listing::JobBoard;

/// Shared application state injected into all route handlers via Axum extractors.
/// The listing and the editor are independent; each sits behind its own lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub board: Arc<RwLock<JobBoard>>,
    pub editor: Arc<RwLock<CvEditor>>,
    /// Preview → PDF pipeline. Inert when no rasterizer is configured.
    pub exports: ExportService,
}

impl AppState {
    pub fn new(config: Config, board: JobBoard, exports: ExportService) -> Self {
        Self {
            config,
            board: Arc::new(RwLock::new(board)),
            editor: Arc::new(RwLock::new(CvEditor::new())),
            exports,
        }
    }
}
