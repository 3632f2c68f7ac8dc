//! Per-request parameter mapping.
//!
//! A [`ParamsEnvelope`] merges the path variables captured by the router
//! with the query string pairs of one request, and decodes the result into
//! a generated params struct.
//!
//! Resolution order is fixed:
//!
//! - a path value always wins over a query value with the same name
//! - among repeated query keys, the last one wins
//!
//! ## Examples
//!
//! ```
//! use conduit::ParamsEnvelope;
//!
//! let envelope = ParamsEnvelope::from_parts(
//!     [("id", "abc123")],
//!     ParamsEnvelope::parse_query(Some("id=other&verbose=yes")),
//! );
//!
//! assert_eq!(envelope.get("id"), Some("abc123"));
//! assert_eq!(envelope.get("verbose"), Some("yes"));
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DispatchError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamsEnvelope {
    values: BTreeMap<String, String>,
}

impl ParamsEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the envelope from path captures and query pairs.
    pub fn from_parts<P, Q, K1, V1, K2, V2>(path: P, query: Q) -> Self
    where
        P: IntoIterator<Item = (K1, V1)>,
        Q: IntoIterator<Item = (K2, V2)>,
        K1: Into<String>,
        V1: Into<String>,
        K2: Into<String>,
        V2: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in query {
            values.insert(key.into(), value.into());
        }
        for (key, value) in path {
            values.insert(key.into(), value.into());
        }
        Self { values }
    }

    /// Splits a raw query string into decoded pairs, in order.
    pub fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
        raw.map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Decodes the envelope into a params struct.
    ///
    /// Every value is a string. Missing keys decode to `None` for optional
    /// fields; unknown keys are ignored.
    ///
    /// ## Errors
    ///
    /// Returns [`DispatchError::BadRequest`] if a required field is missing.
    pub fn decode<P: DeserializeOwned>(&self) -> Result<P, DispatchError> {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        serde_json::from_value(Value::Object(map))
            .map_err(|e| DispatchError::BadRequest(format!("Invalid parameters: {e}")))
    }
}
