//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::proxy::RouteTable;

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub server_port: u16,
    /// Lifetime of cached response bodies
    pub cache_ttl: Duration,
    /// Expired-entry sweep interval in seconds, 0 disables the sweeper
    pub sweep_interval: u64,
    /// Overall timeout for one upstream round trip
    pub upstream_timeout: Duration,
    /// Path to backend pool mapping
    pub routes: RouteTable,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP listen port (default: 8080)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 5)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 30)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 30)
    /// - `PROXY_ROUTES` - JSON route table (default: `/todos/1` on jsonplaceholder)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            routes: routes_from_env().unwrap_or(defaults.routes),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn routes_from_env() -> Option<RouteTable> {
    let raw = env::var("PROXY_ROUTES").ok()?;
    match RouteTable::from_json(&raw) {
        Ok(routes) => Some(routes),
        Err(e) => {
            warn!("Ignoring invalid PROXY_ROUTES ({}), using built-in routes", e);
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_ttl: Duration::from_secs(5),
            sweep_interval: 30,
            upstream_timeout: Duration::from_secs(30),
            routes: RouteTable::reference(),
        }
    }
}
