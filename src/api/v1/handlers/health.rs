/*
 * Responsibility
 * - GET /health (疎通用, 認証なし)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn health_is_public_and_carries_common_headers() {
        let app = TestApp::new();

        let res = app
            .raw(Request::get("/health").body(Body::empty()).unwrap())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers["x-content-type-options"].to_str().unwrap(), "nosniff");
        assert_eq!(headers["cache-control"].to_str().unwrap(), "no-store");
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn incoming_request_id_is_echoed() {
        let app = TestApp::new();

        let res = app
            .raw(
                Request::get("/health")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(res.headers()["x-request-id"].to_str().unwrap(), "req-123");
    }
}
