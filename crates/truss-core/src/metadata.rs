//! Cross-hop metadata propagation.
//!
//! Metadata is a typed key/value bag carried on a [`RequestContext`] and
//! mirrored across HTTP hops via the `X-RPC-Values` header as a single
//! JSON object. Writes fork: calling [`Metadata::with`] clones the
//! backing map and returns a new, independent `Metadata`, so a callee that
//! adds a value never mutates what its caller still holds.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The header carrying a request's metadata bag between gateway and client.
pub const METADATA_HEADER: &str = "X-RPC-Values";

/// Wire shape of one entry: the value is wrapped in a single-attribute
/// object rather than stored bare, so a future field can be added to an
/// entry (e.g. a type hint) without breaking older readers that only know
/// about `v`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    v: Value,
}

/// An immutable, cheaply-cloned bag of named values.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    values: Arc<HashMap<String, Value>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new `Metadata` with `key` set to `value`, leaving `self`
    /// untouched.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    /// Decode the raw value stored under `key` into `T`. Decoding happens
    /// fresh on every call; there is no cache to invalidate.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialize the whole bag to the wire format used for the
    /// [`METADATA_HEADER`] value.
    pub fn to_header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }
        let wrapped: HashMap<&String, Entry> = self
            .values
            .iter()
            .map(|(k, v)| (k, Entry { v: v.clone() }))
            .collect();
        serde_json::to_string(&wrapped).ok()
    }

    /// Parse a header value produced by [`Metadata::to_header_value`].
    pub fn from_header_value(raw: &str) -> Self {
        let wrapped: HashMap<String, Entry> = serde_json::from_str(raw).unwrap_or_default();
        let values = wrapped.into_iter().map(|(k, entry)| (k, entry.v)).collect();
        Self {
            values: Arc::new(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_forks_instead_of_mutating() {
        let base = Metadata::new().with("tenant", "acme");
        let forked = base.with("trace", "t-1");

        assert_eq!(base.get::<String>("tenant").as_deref(), Some("acme"));
        assert_eq!(base.get::<String>("trace"), None);
        assert_eq!(forked.get::<String>("tenant").as_deref(), Some("acme"));
        assert_eq!(forked.get::<String>("trace").as_deref(), Some("t-1"));
    }

    #[test]
    fn round_trips_through_header_value() {
        let md = Metadata::new().with("count", 3).with("name", "beta");
        let header = md.to_header_value().expect("non-empty bag serializes");
        let restored = Metadata::from_header_value(&header);
        assert_eq!(restored.get::<i64>("count"), Some(3));
        assert_eq!(restored.get::<String>("name").as_deref(), Some("beta"));
    }

    #[test]
    fn empty_bag_has_no_header_value() {
        assert_eq!(Metadata::new().to_header_value(), None);
    }
}
