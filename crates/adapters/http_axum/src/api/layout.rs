//! JSON handlers for the layout snapshot.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use aurahome_domain::layout::HomeLayout;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the layout endpoints.
pub enum LayoutResponse {
    Ok(Json<HomeLayout>),
}

impl IntoResponse for LayoutResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/layout`
pub async fn get(State(state): State<AppState>) -> Result<LayoutResponse, ApiError> {
    let layout = state.layout_service.current_layout().await?;
    Ok(LayoutResponse::Ok(Json(layout)))
}

/// `PUT /api/layout`: replace the snapshot with a generated layout.
pub async fn put(
    State(state): State<AppState>,
    body: Result<Json<HomeLayout>, JsonRejection>,
) -> Result<LayoutResponse, ApiError> {
    let Json(layout) = body?;
    let loaded = state.layout_service.load_layout(layout).await?;
    Ok(LayoutResponse::Ok(Json(loaded)))
}
