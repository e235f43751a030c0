//! JSON handlers for single devices.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use aurahome_domain::device::{Device, DeviceChanges};
use aurahome_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the device endpoints.
pub enum DeviceResponse {
    Ok(Json<Device>),
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError> {
    let device = state.layout_service.get_device(&DeviceId::from(id)).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `PATCH /api/devices/{id}`: overwrite any of `state`, `brightness`, `color`.
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DeviceChanges>, JsonRejection>,
) -> Result<DeviceResponse, ApiError> {
    let Json(changes) = body?;
    let device = state
        .layout_service
        .update_device(&DeviceId::from(id), changes)
        .await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `POST /api/devices/{id}/toggle`
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError> {
    let device = state
        .layout_service
        .toggle_device(&DeviceId::from(id))
        .await?;
    Ok(DeviceResponse::Ok(Json(device)))
}
