//! Forwarding pipeline
//!
//! Selects a backend for the inbound request, replays the request against
//! it, rewrites the response body and relays the result.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderName},
    response::Response,
};
use tokio::time::Instant;
use tracing::{info, warn};
use url::Url;

use super::{decode_path, transform_body, BackendPicker, RandomPicker, RouteTable};
use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{ProxyError, Result};

// == Proxy ==
/// Reverse proxy owning its route table and response cache.
///
/// Holds no per-request state; one instance is shared by every request task.
pub struct Proxy {
    routes: RouteTable,
    picker: Arc<dyn BackendPicker>,
    client: reqwest::Client,
    cache: Arc<ResponseCache>,
    cache_ttl: Duration,
}

impl Proxy {
    // == Constructor ==
    /// Creates a proxy with an empty cache.
    ///
    /// # Arguments
    /// * `routes` - Path to backend pool mapping
    /// * `picker` - Policy choosing one backend from a pool
    /// * `client` - HTTP client used for every upstream call
    /// * `cache_ttl` - Lifetime of cached response bodies
    pub fn new(
        routes: RouteTable,
        picker: Arc<dyn BackendPicker>,
        client: reqwest::Client,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            routes,
            picker,
            client,
            cache: Arc::new(ResponseCache::new()),
            cache_ttl,
        }
    }

    /// Creates a proxy from configuration, with random backend selection.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self::new(
            config.routes.clone(),
            Arc::new(RandomPicker),
            client,
            config.cache_ttl,
        ))
    }

    /// Shared handle to the response cache.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    // == Forward ==
    /// Forwards `request` to a backend chosen for its path.
    ///
    /// The outbound URL is the backend base followed by the request path; the
    /// query string is not forwarded. Method, body and headers are copied.
    /// The backend status and headers are relayed and the body is rewritten
    /// with [`transform_body`]. Failures are returned immediately, never
    /// retried against another backend.
    pub async fn forward(&self, request: Request) -> Result<Response> {
        let start = Instant::now();
        let (parts, body) = request.into_parts();
        let path = decode_path(parts.uri.path());
        let path = path.as_ref();

        let backend = self
            .routes
            .select_backend(path, self.picker.as_ref())
            .ok_or_else(|| ProxyError::NoBackend(path.to_string()))?;

        let base = Url::parse(backend).map_err(|source| ProxyError::InvalidBackendUrl {
            url: backend.to_string(),
            source,
        })?;
        let target = format!("{}{}", base.as_str().trim_end_matches('/'), path);

        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ProxyError::RequestBuild(e.to_string()))?;
        let outbound = self
            .client
            .request(parts.method.clone(), &target)
            .headers(outbound_headers(&parts.headers))
            .body(body)
            .build()
            .map_err(|e| ProxyError::RequestBuild(e.to_string()))?;

        let upstream = self.client.execute(outbound).await.map_err(|e| {
            warn!(backend, error = %e, "Error forwarding to backend");
            ProxyError::Upstream(e.to_string())
        })?;

        let status = upstream.status();
        let upstream_headers = upstream.headers().clone();
        let body = upstream
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(backend, error = %e, "Timed out reading backend response");
                    ProxyError::Upstream(e.to_string())
                } else {
                    ProxyError::ResponseBody(e.to_string())
                }
            })?;

        let mut response = Response::new(Body::from(transform_body(&body)));
        *response.status_mut() = status;
        relay_headers(&upstream_headers, response.headers_mut());

        info!(
            path,
            backend,
            status = status.as_u16(),
            duration = ?start.elapsed(),
            "Request proxied"
        );

        Ok(response)
    }
}

/// Headers describing body framing; recomputed for the buffered body on
/// each side of the proxy.
fn is_framing_header(name: &HeaderName) -> bool {
    name == header::CONTENT_LENGTH || name == header::TRANSFER_ENCODING
}

/// Inbound headers to send upstream. `Host` is left to the client so it
/// matches the backend; hop-by-hop headers are not stripped.
fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    headers
}

/// Copies every upstream header onto `to`, replacing all existing values of
/// the same name.
fn relay_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for name in from.keys() {
        if is_framing_header(name) {
            continue;
        }
        to.remove(name);
        for value in from.get_all(name) {
            to.append(name.clone(), value.clone());
        }
    }
}
