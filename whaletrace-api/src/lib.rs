//! Whaletrace API - REST Layer
//!
//! Axum HTTP surface over the store, rule engine, and assistant runtime.
//! All state is injected through `AppState`; there are no module-level
//! globals, and the conversational endpoints never return upstream errors.

pub mod config;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;
pub mod validation;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::AppState;

// ============================================================================
// ROUTER TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;
    use whaletrace_agent::{default_registry, AssistantRuntime};
    use whaletrace_store::MemoryStore;

    async fn test_router() -> axum::Router {
        let store = Arc::new(MemoryStore::with_demo_data());
        let registry = default_registry(store.clone()).unwrap();
        let assistant = Arc::new(AssistantRuntime::new(registry, None, None));
        let state = AppState::new(store, assistant);
        create_api_router(state, &ApiConfig::default())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let router = test_router().await;
        for uri in ["/health", "/health/live", "/health/ready"] {
            let response = router.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
        }
    }

    #[tokio::test]
    async fn test_chat_always_200() {
        let router = test_router().await;
        for query in ["market update", "What's the weather today?", ""] {
            let response = router
                .clone()
                .oneshot(post_json("/api/v1/chat", serde_json::json!({"query": query})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["choices"][0]["message"]["role"], "assistant");
            assert!(json["choices"][0]["message"]["content"].is_string());
        }
    }

    #[tokio::test]
    async fn test_chat_malformed_body_still_200() {
        let router = test_router().await;

        // Invalid JSON, wrong field, and a missing content-type header all
        // get a well-formed assistant reply instead of a 4xx rejection.
        let requests = vec![
            Request::builder()
                .method("POST")
                .uri("/api/v1/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
            post_json("/api/v1/chat", serde_json::json!({"wrong_field": "hi"})),
            Request::builder()
                .method("POST")
                .uri("/api/v1/assistant")
                .body(Body::from("plain text"))
                .unwrap(),
        ];
        for request in requests {
            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["choices"][0]["message"]["role"], "assistant");
            assert!(json["choices"][0]["message"]["content"]
                .as_str()
                .unwrap()
                .contains("JSON body"));
        }
    }

    #[tokio::test]
    async fn test_assistant_alias_shape() {
        let router = test_router().await;
        let response = router
            .oneshot(post_json(
                "/api/v1/assistant",
                serde_json::json!({"message": "show recent transactions"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap()
            .contains("whale transactions"));
    }

    #[tokio::test]
    async fn test_notification_check_then_list_then_acknowledge() {
        let router = test_router().await;

        // Demo data trips several rules on the first pass.
        let response = router
            .clone()
            .oneshot(post_empty("/api/v1/notifications/check"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let check = body_json(response).await;
        let created = check["created"].as_array().unwrap();
        assert!(!created.is_empty());

        // Second pass creates nothing: the first batch is still pending.
        let response = router
            .clone()
            .oneshot(post_empty("/api/v1/notifications/check"))
            .await
            .unwrap();
        let recheck = body_json(response).await;
        assert!(recheck["created"].as_array().unwrap().is_empty());

        let response = router
            .clone()
            .oneshot(get("/api/v1/notifications"))
            .await
            .unwrap();
        let list = body_json(response).await;
        assert_eq!(list["total"].as_u64().unwrap() as usize, created.len());

        let id = created[0]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/notifications/{}/acknowledge", id);
        let response = router.clone().oneshot(post_empty(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let acked = body_json(response).await;
        assert_eq!(acked["acknowledged"], true);

        // Repeat acknowledgement is a no-op, unknown id is 404.
        let response = router.clone().oneshot(post_empty(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(post_empty("/api/v1/notifications/999999/acknowledge"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wallet_lookup_and_errors() {
        let router = test_router().await;

        let response = router.clone().oneshot(get("/api/v1/wallets")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list = body_json(response).await;
        let address = list["wallets"][0]["address"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(get(&format!("/api/v1/wallets/{}", address)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Well-formed but unknown address.
        let response = router
            .clone()
            .oneshot(get("/api/v1/wallets/0xdead"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Malformed address.
        let response = router
            .oneshot(get("/api/v1/wallets/not-an-address"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transactions_limit_validation() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(get("/api/v1/transactions?limit=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["total"].as_u64().unwrap() <= 3);

        let response = router
            .oneshot(get("/api/v1/transactions?limit=0"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_market_and_insights() {
        let router = test_router().await;

        let response = router.clone().oneshot(get("/api/v1/market")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(!json["quotes"].as_array().unwrap().is_empty());

        let response = router.oneshot(get("/api/v1/insights")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_alert_crud_over_http() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/v1/alerts",
                serde_json::json!({"category": "BTC", "threshold": 20000.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let alert = body_json(response).await;
        let id = alert["id"].as_i64().unwrap();
        // Demo user is the implied owner.
        assert_eq!(alert["user_id"], 1);

        let response = router.clone().oneshot(get("/api/v1/alerts")).await.unwrap();
        let list = body_json(response).await;
        assert_eq!(list["total"], 1);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/alerts/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/alerts/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_alert_payload_rejected() {
        let router = test_router().await;
        let response = router
            .oneshot(post_json(
                "/api/v1/alerts",
                serde_json::json!({"category": "", "threshold": -1.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[cfg(feature = "openapi")]
    #[tokio::test]
    async fn test_openapi_json_served() {
        let router = test_router().await;
        let response = router.oneshot(get("/openapi.json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["info"]["title"], "Whaletrace API");
    }
}
