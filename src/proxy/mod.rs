//! Proxy Module
//!
//! Route table, backend selection, request forwarding and response body
//! rewriting.

mod forward;
mod routes;
mod selector;
mod transform;

// Re-export public types
pub use forward::Proxy;
pub use routes::{decode_path, RouteTable, DEFAULT_BACKEND};
pub use selector::{BackendPicker, RandomPicker};
pub use transform::transform_body;
