//! API Handlers
//!
//! Shared application state and the forwarding entry point.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::Response,
};

use crate::config::Config;
use crate::error::Result;
use crate::proxy::Proxy;

/// Application state shared across all handlers.
///
/// Wraps the single proxy instance, which owns the route table and cache.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<Proxy>,
}

impl AppState {
    /// Creates a new AppState around the given proxy.
    pub fn new(proxy: Proxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Ok(Self::new(Proxy::from_config(config)?))
    }
}

/// Fallback handler for every path and method.
///
/// Forwards the request through the proxy; errors render as JSON with a
/// gateway or internal-error status.
pub async fn proxy_handler(State(state): State<AppState>, request: Request) -> Result<Response> {
    state.proxy.forward(request).await
}
