//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and includes a [`TraceLayer`] that logs
/// each HTTP request/response using the `tracing` ecosystem.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use aurahome_app::event_bus::InProcessEventBus;
    use aurahome_domain::device::Device;
    use aurahome_domain::layout::HomeLayout;
    use aurahome_domain::palette::Brightness;
    use aurahome_domain::room::Room;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn home() -> HomeLayout {
        HomeLayout::new(vec![Room::new("Living Room").with_device(Device::light(
            "lr-1",
            "Main Light",
            Brightness::MAX,
            "#FFFFFF",
        ))])
    }

    async fn app_with_layout() -> Router {
        let state = AppState::new(Arc::new(InProcessEventBus::new(16)));
        state.layout_service.load_layout(home()).await.unwrap();
        build(state)
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(AppState::new(Arc::new(InProcessEventBus::new(16))));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_when_no_layout_loaded() {
        let app = build(AppState::new(Arc::new(InProcessEventBus::new(16))));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/layout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "no layout loaded");
    }

    #[tokio::test]
    async fn should_serve_loaded_layout_in_camel_case() {
        let resp = app_with_layout()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api/layout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["rooms"][0]["gridSpan"]["colSpan"], 1);
        assert_eq!(body["rooms"][0]["devices"][0]["type"], "light");
    }

    #[tokio::test]
    async fn should_reject_invalid_layout_on_put() {
        let body = json!({"rooms": [{"name": "Attic", "gridPosition": {"row": 1, "col": 13}}]});
        let resp = app_with_layout()
            .await
            .oneshot(json_request("PUT", "/api/layout", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_patch_device_fields() {
        let resp = app_with_layout()
            .await
            .oneshot(json_request(
                "PATCH",
                "/api/devices/lr-1",
                &json!({"brightness": 35, "color": "#f012be"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["brightness"], 35);
        assert_eq!(body["color"], "#f012be");
        assert_eq!(body["state"], "off");
    }

    async fn patch_light(body: &Value) -> (StatusCode, Value) {
        let resp = app_with_layout()
            .await
            .oneshot(json_request("PATCH", "/api/devices/lr-1", body))
            .await
            .unwrap();
        let status = resp.status();
        (status, body_json(resp).await)
    }

    #[tokio::test]
    async fn should_reject_free_text_state_on_light() {
        let (status, body) = patch_light(&json!({"state": "dimmed"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lr-1"));
    }

    #[tokio::test]
    async fn should_reject_brightness_above_hundred() {
        let (status, body) = patch_light(&json!({"brightness": 150})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn should_report_undecodable_body_as_json_error() {
        let (status, body) = patch_light(&json!({"brightness": 300})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn should_report_layout_without_rooms_as_json_error() {
        let resp = app_with_layout()
            .await
            .oneshot(json_request("PUT", "/api/layout", &json!({"floors": []})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let resp = app_with_layout()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api/devices/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_toggle_device() {
        let resp = app_with_layout()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/devices/lr-1/toggle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["state"], "on");
    }

    #[tokio::test]
    async fn should_apply_matching_command() {
        let resp = app_with_layout()
            .await
            .oneshot(json_request(
                "POST",
                "/api/commands",
                &json!({"utterance": "Turn on living room main light and set to blue"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["matched"], true);
        assert_eq!(body["changed"], json!(["lr-1"]));
        let light = &body["layout"]["rooms"][0]["devices"][0];
        assert_eq!(light["state"], "on");
        assert_eq!(light["color"], "#0074D9");
    }

    #[tokio::test]
    async fn should_report_unmatched_command_with_unchanged_layout() {
        let resp = app_with_layout()
            .await
            .oneshot(json_request(
                "POST",
                "/api/commands",
                &json!({"utterance": "living room main light color to mauve"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["matched"], false);
        assert_eq!(body["changed"], json!([]));
        assert_eq!(body["layout"], serde_json::to_value(home()).unwrap());
    }
}
