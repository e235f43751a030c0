//! Shared application state for axum handlers.

use std::sync::Arc;

use aurahome_app::event_bus::InProcessEventBus;
use aurahome_app::services::layout_service::LayoutService;

/// The layout service as wired by the daemon: publishing onto the shared bus.
pub type SharedLayoutService = LayoutService<Arc<InProcessEventBus>>;

/// Application state shared across all axum handlers.
///
/// `Clone` only clones the `Arc` wrappers.
#[derive(Clone)]
pub struct AppState {
    /// Current layout snapshot and its use-cases.
    pub layout_service: Arc<SharedLayoutService>,
    /// Bus the service publishes on; SSE handlers subscribe here.
    pub event_bus: Arc<InProcessEventBus>,
}

impl AppState {
    /// Wire a fresh layout service onto `event_bus`.
    #[must_use]
    pub fn new(event_bus: Arc<InProcessEventBus>) -> Self {
        let layout_service = LayoutService::new(Arc::clone(&event_bus));
        Self {
            layout_service: Arc::new(layout_service),
            event_bus,
        }
    }
}
