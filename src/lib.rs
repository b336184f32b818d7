//! TTL Proxy - A minimal HTTP reverse proxy with a response cache
//!
//! Forwards each request to a randomly chosen backend for its path, rewrites
//! the response body and caches it for a short TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod proxy;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use proxy::Proxy;
pub use tasks::spawn_sweep_task;
