//! API Routes
//!
//! Configures the Axum router: every path is proxied through the cache layer.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use super::cache_layer::cache_middleware;
use super::handlers::{proxy_handler, AppState};

/// Creates the main router.
///
/// # Routing
/// - Any method, any path - forwarded to a backend for that exact path
///
/// # Middleware
/// - Response cache keyed on path and query
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .layer(middleware::from_fn_with_state(state.clone(), cache_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::{Proxy, RandomPicker, RouteTable};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, AppState) {
        let proxy = Proxy::new(
            RouteTable::new([("/empty", Vec::<String>::new())]),
            Arc::new(RandomPicker),
            reqwest::Client::new(),
            Duration::from_secs(300),
        );
        let state = AppState::new(proxy);
        (create_router(state.clone()), state)
    }

    #[tokio::test]
    async fn test_unrouted_path_is_bad_gateway() {
        let (app, _) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_any_method_is_proxied() {
        let (app, _) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/empty")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_error_body_is_cached_and_replayed_as_ok() {
        let (app, state) = create_test_app();

        let first = app
            .clone()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::BAD_GATEWAY);
        let first_body = axum::body::to_bytes(first.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(state.proxy.cache().len().await, 1);

        // Only the body is replayed on a hit
        let second = app
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert!(second.headers().get("content-type").is_none());
        let second_body = axum::body::to_bytes(second.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(first_body, second_body);
    }
}
