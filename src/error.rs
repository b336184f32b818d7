//! Error types for the proxy
//!
//! Provides unified error handling using thiserror. Every variant is local to
//! the request that produced it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the forwarding pipeline.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// No route, or a route with no backends, for the request path
    #[error("No backend found for {0}")]
    NoBackend(String),

    /// Configured backend base URL does not parse
    #[error("Invalid backend URL {url}: {source}")]
    InvalidBackendUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Outbound request could not be constructed
    #[error("Error creating proxy request: {0}")]
    RequestBuild(String),

    /// Backend unreachable, failed, or timed out
    #[error("Error forwarding request: {0}")]
    Upstream(String),

    /// Backend response body could not be read
    #[error("Error reading response body: {0}")]
    ResponseBody(String),
}

impl ProxyError {
    /// Status code returned to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NoBackend(_) | ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidBackendUrl { .. }
            | ProxyError::RequestBuild(_)
            | ProxyError::ResponseBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_class_errors() {
        assert_eq!(
            ProxyError::NoBackend("/x".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::Upstream("timeout".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_class_errors() {
        assert_eq!(
            ProxyError::RequestBuild("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::ResponseBody("eof".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_renders_json_body() {
        let response = ProxyError::NoBackend("/missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "No backend found for /missing");
    }
}
