//! Response caching middleware
//!
//! Serves repeated requests for the same path and query from the response
//! cache, and records inner responses into it on a miss.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::response::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use super::AppState;
use crate::cache::cache_key;
use crate::error::ProxyError;
use crate::proxy::decode_path;

// == Response Recorder ==
/// Captures an inner response while passing it through unchanged.
///
/// Owns the response head destined for the client and a copy of every body
/// byte written to it.
#[derive(Debug)]
pub struct ResponseRecorder {
    head: Parts,
    body: Bytes,
}

impl ResponseRecorder {
    /// Drains the body of `response` into the recorder.
    pub async fn record(response: Response) -> Result<Self, axum::Error> {
        let (head, body) = response.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX).await?;
        Ok(Self { head, body })
    }

    /// Bytes captured from the inner response.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl IntoResponse for ResponseRecorder {
    fn into_response(self) -> Response {
        Response::from_parts(self.head, Body::from(self.body))
    }
}

// == Cache Middleware ==
/// Wraps the proxy handler with the response cache.
///
/// A hit replays only the cached body: status is the default 200 and no
/// headers from the original response are restored. A miss runs the inner
/// handler and caches whatever body it produced, error bodies included, for
/// the proxy's cache TTL.
pub async fn cache_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = decode_path(request.uri().path()).into_owned();
    let key = cache_key(&path, request.uri().query());
    let cache = state.proxy.cache();

    if let Some(body) = cache.get(&key).await {
        info!(path = %path, "Cache hit");
        return Response::new(Body::from(body));
    }

    let recorder = match ResponseRecorder::record(next.run(request).await).await {
        Ok(recorder) => recorder,
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to capture response body");
            return ProxyError::ResponseBody(e.to_string()).into_response();
        }
    };

    debug!(path = %path, bytes = recorder.body().len(), "Caching response");
    cache
        .set(key, recorder.body().clone(), state.proxy.cache_ttl())
        .await;

    recorder.into_response()
}
