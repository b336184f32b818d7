//! Route table mapping exact request paths to backend pools.

use std::borrow::Cow;
use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use super::BackendPicker;

/// Backend used by the built-in route table.
pub const DEFAULT_BACKEND: &str = "https://jsonplaceholder.typicode.com";

/// Percent-decodes a request path for route lookup and cache keys.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

// == Route Table ==
/// Immutable mapping from an exact request path to its backend base URLs.
///
/// Deserializes from a JSON object such as
/// `{"/todos/1": ["https://a.example", "https://b.example"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: HashMap<String, Vec<String>>,
}

impl RouteTable {
    /// Creates a table from `(path, backends)` pairs.
    pub fn new<I, P, B>(routes: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<B>)>,
        P: Into<String>,
        B: Into<String>,
    {
        Self {
            routes: routes
                .into_iter()
                .map(|(path, backends)| {
                    (path.into(), backends.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Parses a table from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Returns the backend pool configured for `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.routes.get(path).map(Vec::as_slice)
    }

    /// Picks one backend for `path`.
    ///
    /// Returns `None` when the path is unknown or its pool is empty.
    pub fn select_backend(&self, path: &str, picker: &dyn BackendPicker) -> Option<&str> {
        let backends = self.get(path)?;
        if backends.is_empty() {
            return None;
        }
        backends.get(picker.pick(backends.len())).map(String::as_str)
    }

    /// Number of configured paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The built-in table: `/todos/1` served by two identical backends.
    pub fn reference() -> Self {
        Self::new([("/todos/1", vec![DEFAULT_BACKEND, DEFAULT_BACKEND])])
    }
}
