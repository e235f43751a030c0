//! JSON handler for free-text commands.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use aurahome_domain::id::DeviceId;
use aurahome_domain::layout::HomeLayout;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for running a command.
#[derive(Deserialize)]
pub struct CommandRequest {
    pub utterance: String,
}

/// Response body: what changed, and the snapshot now in effect.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub matched: bool,
    pub changed: Vec<DeviceId>,
    pub layout: HomeLayout,
}

/// Possible responses from the command endpoint.
pub enum RunResponse {
    Ok(Json<CommandResponse>),
}

impl IntoResponse for RunResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/commands`
///
/// An unmatched utterance is a `200` with `matched: false`.
pub async fn run(
    State(state): State<AppState>,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<RunResponse, ApiError> {
    let Json(req) = body?;
    let report = state.layout_service.handle_command(&req.utterance).await?;
    Ok(RunResponse::Ok(Json(CommandResponse {
        matched: report.matched,
        changed: report.changed,
        layout: report.layout,
    })))
}
