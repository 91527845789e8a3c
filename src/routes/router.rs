use crate::core::state::AppState;
use crate::routes::{fallback, health, message, token};
use crate::utils;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info_span;

pub(crate) fn routes(state: AppState) -> Router {
    // /token/...
    let token_router = Router::new()
        .route("/", post(token::issue))
        .route("/stats", get(token::stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(health::get))
        .route(
            "/DevOps",
            post(message::post)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    utils::auth::require_api_key,
                ))
                .fallback(fallback::error),
        )
        .nest("/token", token_router)
        .fallback(fallback::error)
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http().make_span_with(
                |request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str);

                    info_span!(
                        "request",
                        method = ?request.method(),
                        matched_path,
                    )
                },
            )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::token::TokenController;
    use crate::types::token::Payload;
    use crate::utils::auth::{API_KEY_HEADER, JWT_HEADER};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    const API_KEY: &str = "2f5ae96c-b558-4c7b-a590-a501ae1c3f6c";

    fn test_state() -> AppState {
        AppState::new(
            API_KEY,
            TokenController::new(
                "router-secret",
                Duration::from_secs(300),
                Duration::from_secs(60),
            ),
        )
    }

    fn message_body() -> Value {
        json!({
            "message": "This is a test",
            "to": "Juan Perez",
            "from": "Rita Asturia",
            "timeToLifeSec": 45
        })
    }

    fn message_request(
        api_key: Option<&str>,
        token: Option<&str>,
        body: &Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/DevOps")
            .header("content-type", "application/json");

        if let Some(api_key) = api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        if let Some(token) = token {
            builder = builder.header(JWT_HEADER, token);
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_post_message_with_valid_credentials() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();
        let app = routes(state);

        let response = app
            .oneshot(message_request(Some(API_KEY), Some(&token), &message_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            json,
            json!({ "message": "Hello Juan Perez your message will be send" })
        );
    }

    #[tokio::test]
    async fn test_post_message_token_is_single_use() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();
        let app = routes(state);

        let first = app
            .clone()
            .oneshot(message_request(Some(API_KEY), Some(&token), &message_body()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(message_request(Some(API_KEY), Some(&token), &message_body()))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(second).await, "JWT token already used");
    }

    #[tokio::test]
    async fn test_missing_api_key_returns_401() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();

        let response = routes(state.clone())
            .oneshot(message_request(None, Some(&token), &message_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Invalid API Key");
        // The token was not spent on a request without a valid key
        assert_eq!(state.token_controller.stats().await.used_count, 0);
    }

    #[tokio::test]
    async fn test_invalid_api_key_returns_401() {
        let response = routes(test_state())
            .oneshot(message_request(
                Some("invalid-key-12345"),
                Some("valid_jwt_token"),
                &message_body(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_jwt_returns_401() {
        let response = routes(test_state())
            .oneshot(message_request(Some(API_KEY), None, &message_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Missing JWT token");
    }

    #[tokio::test]
    async fn test_invalid_jwt_returns_401() {
        let response = routes(test_state())
            .oneshot(message_request(
                Some(API_KEY),
                Some("invalid.jwt.token"),
                &message_body(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Invalid JWT token");
    }

    #[tokio::test]
    async fn test_missing_field_returns_422() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();

        let response = routes(state)
            .oneshot(message_request(
                Some(API_KEY),
                Some(&token),
                &json!({ "message": "Test", "to": "Juan Perez" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rejected_body_keeps_token_usable() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();
        let app = routes(state.clone());

        let response = app
            .clone()
            .oneshot(message_request(
                Some(API_KEY),
                Some(&token),
                &json!({ "message": "Test", "to": "Juan Perez" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let mut body = message_body();
        body["message"] = json!("");
        let response = app
            .clone()
            .oneshot(message_request(Some(API_KEY), Some(&token), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.token_controller.stats().await.used_count, 0);

        let response = app
            .oneshot(message_request(Some(API_KEY), Some(&token), &message_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_time_to_life_returns_422() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();
        let mut body = message_body();
        body["timeToLifeSec"] = json!(-1);

        let response = routes(state)
            .oneshot(message_request(Some(API_KEY), Some(&token), &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_empty_recipient_returns_422() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();
        let mut body = message_body();
        body["to"] = json!("");

        let response = routes(state)
            .oneshot(message_request(Some(API_KEY), Some(&token), &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unsupported_methods_return_error() {
        let app = routes(test_state());

        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let request = Request::builder()
                .method(method.clone())
                .uri("/DevOps")
                .header(API_KEY_HEADER, API_KEY)
                .body(Body::empty())
                .unwrap();

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(body_text(response).await, "ERROR");
        }
    }

    #[tokio::test]
    async fn test_unknown_routes_return_error() {
        let app = routes(test_state());

        for uri in ["/", "/invalid-route"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_text(response).await, "ERROR");
        }
    }

    #[tokio::test]
    async fn test_health_returns_healthy() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = routes(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json, json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn test_issue_token_then_send_message() {
        let app = routes(test_state());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/token")
            .header(API_KEY_HEADER, API_KEY)
            .header("content-type", "application/json")
            .body(Body::from(json!({ "payload": { "role": "ops" } }).to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["expires_in"], 300);
        let token = json["token"].as_str().unwrap();

        let response = app
            .oneshot(message_request(Some(API_KEY), Some(token), &message_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_issue_token_requires_api_key() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/token")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = routes(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_stats_reports_used_tokens() {
        let state = test_state();
        let token = state.token_controller.issue(Payload::new()).unwrap();
        let app = routes(state);

        app.clone()
            .oneshot(message_request(Some(API_KEY), Some(&token), &message_body()))
            .await
            .unwrap();

        let request = Request::builder()
            .uri("/token/stats")
            .header(API_KEY_HEADER, API_KEY)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["used_count"], 1);
        assert_eq!(json["ttl_seconds"], 300);
        assert!(json["last_eviction_timestamp"].is_i64());
    }
}
