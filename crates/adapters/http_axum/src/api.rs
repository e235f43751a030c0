//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod commands;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod layout;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Layout
        .route("/layout", get(layout::get).put(layout::put))
        // Devices
        .route("/devices/{id}", get(devices::get).patch(devices::patch))
        .route("/devices/{id}/toggle", post(devices::toggle))
        // Commands
        .route("/commands", post(commands::run))
        // Events
        .route("/events/stream", get(events::stream))
}
