//! Request descriptor subsystem.
//!
//! # Data Flow
//! ```text
//! inbound body bytes
//!     → serde_json (MalformedInput on parse failure)
//!     → validator.rs against the configured contract.rs (SchemaViolation)
//!     → Descriptor (validated, immutable, one per inbound call)
//! ```
//!
//! # Design Decisions
//! - Two access modes: `require` fails on a missing segment, `try_get`
//!   substitutes a default; handlers only use default-aware reads for
//!   optional fields
//! - Payload shape comes from which key is populated, never from content

pub mod contract;
pub mod validator;

use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{ProxyError, ProxyResult, RequestError};

pub use contract::SchemaVariant;
pub use validator::SchemaViolation;

/// Outbound payload selected by a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body is sent.
    None,
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// JSON body.
    Json(Value),
}

/// Validated, read-only view of an inbound request description.
#[derive(Debug, Clone)]
pub struct Descriptor {
    document: Value,
    variant: SchemaVariant,
}

impl Descriptor {
    /// Parse and validate a raw inbound body.
    pub fn parse(body: &[u8], variant: SchemaVariant) -> Result<Self, RequestError> {
        let document: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(document, variant)?)
    }

    /// Validate an already parsed document.
    pub fn from_value(document: Value, variant: SchemaVariant) -> Result<Self, SchemaViolation> {
        validator::validate(variant.contract(), &document)?;
        Ok(Self { document, variant })
    }

    /// Walk `path`; on failure returns the index of the first absent segment.
    fn walk(&self, path: &[&str]) -> Result<&Value, usize> {
        path.iter()
            .enumerate()
            .try_fold(&self.document, |node, (i, key)| node.get(*key).ok_or(i))
    }

    /// Look up a field the contract guarantees.
    pub fn require(&self, path: &[&str]) -> ProxyResult<&Value> {
        self.walk(path).map_err(|missing| ProxyError::MissingField {
            key: path[missing].to_string(),
            path: path[..=missing].join("/"),
        })
    }

    /// Look up an optional field, falling back to `default` when absent.
    pub fn try_get<'a>(&'a self, path: &[&str], default: &'a Value) -> &'a Value {
        self.walk(path).unwrap_or(default)
    }

    fn require_str(&self, path: &[&str]) -> ProxyResult<&str> {
        self.require(path)?
            .as_str()
            .ok_or_else(|| ProxyError::InvalidField {
                path: path.join("/"),
                expected: "a string",
            })
    }

    /// Raw `meta.method` token.
    pub fn method(&self) -> ProxyResult<&str> {
        self.require_str(&["meta", "method"])
    }

    pub fn url(&self) -> ProxyResult<&str> {
        self.require_str(&["meta", "url"])
    }

    /// Headers to forward, empty when `headers` is absent.
    pub fn headers(&self) -> Vec<(String, String)> {
        let empty = Value::Object(Map::new());
        match self.try_get(&["headers"], &empty) {
            Value::Object(map) => map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `meta.timeout` in seconds, or `default_secs` when absent. The lenient
    /// contract has no timeout field, so it always gets `default_secs`.
    pub fn timeout(&self, default_secs: u64) -> Duration {
        if self.variant == SchemaVariant::Lenient {
            return Duration::from_secs(default_secs);
        }
        let fallback = Value::from(default_secs);
        let secs = self
            .try_get(&["meta", "timeout"], &fallback)
            .as_u64()
            .unwrap_or(default_secs);
        Duration::from_secs(secs)
    }

    pub fn post_type(&self) -> Option<&str> {
        self.try_get(&["meta", "post_type"], &Value::Null).as_str()
    }

    /// The body to send, as selected by the enforced contract.
    pub fn payload(&self) -> Payload {
        match self.variant {
            SchemaVariant::Strict => {
                let data = self.try_get(&["data"], &Value::Null);
                match (self.post_type(), data) {
                    (_, Value::Null) => Payload::None,
                    (Some("form"), Value::Object(map)) => Payload::Form(form_pairs(map)),
                    (Some("json"), data) => Payload::Json(data.clone()),
                    _ => Payload::None,
                }
            }
            SchemaVariant::Lenient => {
                if let Value::Object(map) = self.try_get(&["data", "forms"], &Value::Null) {
                    Payload::Form(form_pairs(map))
                } else {
                    match self.try_get(&["data", "json"], &Value::Null) {
                        Value::Null => Payload::None,
                        json => Payload::Json(json.clone()),
                    }
                }
            }
        }
    }
}

/// Flatten an object into form pairs. `null` values are dropped and arrays
/// repeat the key once per element.
pub fn form_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = form_value(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = form_value(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn form_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
