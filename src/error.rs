//! Error taxonomy for the relay.
//!
//! # Data Flow
//! ```text
//! body bytes → RequestError (400, surfaced where the body is parsed)
//! dispatch / handler / client → ProxyError (500, surfaced by the relay)
//! ```
//!
//! # Design Decisions
//! - Both enums render the caller-visible plain-text message via `Display`
//! - No structured error bodies

use thiserror::Error;

use crate::descriptor::validator::SchemaViolation;

/// Errors raised while turning the inbound body into a descriptor.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body is not parseable JSON.
    #[error("{0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The document does not satisfy the descriptor contract.
    #[error("{0}")]
    SchemaViolation(#[from] SchemaViolation),
}

/// Errors raised while dispatching a descriptor and calling the origin.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A field the contract guarantees is absent.
    #[error("missing field '{key}' (at /{path})")]
    MissingField { key: String, path: String },

    /// A guaranteed field is present but has the wrong type.
    #[error("field /{path} must be {expected}")]
    InvalidField { path: String, expected: &'static str },

    /// No handler is wired for the declared method.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// `meta.url` could not be parsed as an absolute URL.
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A forwarded header name or value is not valid HTTP.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// The outbound call failed (connect, DNS, timeout, protocol).
    #[error("{0}")]
    Transport(String),
}

/// Result type for dispatch and origin calls.
pub type ProxyResult<T> = Result<T, ProxyError>;
