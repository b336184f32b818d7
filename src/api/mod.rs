//! API Module
//!
//! HTTP entry point for the proxy.
//!
//! # Request flow
//! - Cache layer: replays a cached body or records the inner response
//! - Proxy handler: forwards to a backend selected for the request path

pub mod cache_layer;
pub mod handlers;
pub mod routes;

pub use cache_layer::{cache_middleware, ResponseRecorder};
pub use handlers::*;
pub use routes::create_router;
