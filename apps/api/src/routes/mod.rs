pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::composer::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document builds
        .route("/api/v1/documents/plan", post(handlers::handle_plan))
        .route("/api/v1/documents/preview", post(handlers::handle_preview))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        build_router(AppState::new(&config))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn quote_request() -> Value {
        json!({
            "type": "quote",
            "date": "2026-10-19",
            "customer": { "name": "Bo Bygg AB", "phone": "070-000 00 00" },
            "items": [
                { "name": "Larmsystem Basic", "quantity": 2, "price": 1000 },
                { "name": "Kamera", "quantity": 1, "price": 1200, "discount": 10 },
                { "name": "Kabel", "quantity": 5, "price": 100 }
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "quotedoc");
    }

    #[tokio::test]
    async fn test_plan_returns_totals_and_pages() {
        let response = app()
            .oneshot(post_json("/api/v1/documents/plan", quote_request()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["kind"], "quote");
        assert_eq!(body["file_stem"], "tretec_quote_20261019");
        assert_eq!(body["totals"]["subtotal"], 358_000);
        assert_eq!(body["totals"]["tax"], 89_500);
        assert_eq!(body["totals"]["grand_total"], 447_500);
        assert!(body["page_count"].as_u64().unwrap() >= 1);
        assert_eq!(
            body["plan"]["pages"].as_array().unwrap().len() as u64,
            body["page_count"].as_u64().unwrap()
        );
    }

    #[tokio::test]
    async fn test_agreement_without_items_is_unprocessable() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/documents/plan",
                json!({ "type": "agreement", "customer": { "name": "Bo Bygg AB" } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_negative_price_is_unprocessable() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/documents/plan",
                json!({ "items": [ { "name": "Larm", "quantity": 1, "price": -5 } ] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/documents/plan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ \"items\": [ "))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_is_a_text_download() {
        let response = app()
            .oneshot(post_json("/api/v1/documents/preview", quote_request()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tretec_quote_20261019.txt\""
        );
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("OFFERT"));
        assert!(text.contains("! SAKNAS"));
        assert!(text.contains("Sida 1 av"));
    }
}
