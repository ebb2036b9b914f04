use folio_core::cascade::Orchestrator;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared application state accessible from all handlers.
pub struct AppState {
    /// Built once at startup and shared by every request.
    pub orchestrator: Orchestrator,
    /// Largest accepted PDF upload in bytes.
    pub max_upload_bytes: usize,
    /// Bounds extractions in flight. An in-process backend that times out keeps
    /// its thread until it finishes on its own; the permit is released when the
    /// request gives up on it.
    pub extraction_slots: Arc<Semaphore>,
}
