//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use aurahome_domain::error::HomeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeError`] and rejected request bodies to an HTTP response with
/// appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    Home(HomeError),
    Body(JsonRejection),
}

impl From<HomeError> for ApiError {
    fn from(err: HomeError) -> Self {
        Self::Home(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Home(HomeError::Validation(_) | HomeError::Parse(_)) => StatusCode::BAD_REQUEST,
            Self::Home(HomeError::NotFound(_) | HomeError::NoLayout) => StatusCode::NOT_FOUND,
            Self::Body(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Self::Body(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Home(err) => err.to_string(),
            Self::Body(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.message();
        tracing::debug!(%error, %status, "request failed");
        (status, Json(ErrorBody { error })).into_response()
    }
}
