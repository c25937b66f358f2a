//! Outbound HTTP client seam.
//!
//! # Data Flow
//! ```text
//! handler → OutboundRequest → HttpClient::send → OriginResponse → relay
//! ```
//!
//! # Design Decisions
//! - Connection pooling, TLS and DNS belong to the client implementation
//! - One `send` is one outbound call; no retries
//! - Bodies are returned as received (no decompression)

pub mod reqwest_client;

#[cfg(test)]
pub(crate) mod mock;

use std::future::Future;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};

use crate::descriptor::Payload;
use crate::error::ProxyResult;

pub use reqwest_client::ReqwestClient;

/// Methods a descriptor may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Parse a lower-case method token. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "delete" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single call to the origin, fully resolved from a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    /// Forwarded verbatim, in descriptor order.
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
    /// `None` means no per-request timeout is enforced.
    pub timeout: Option<Duration>,
}

/// What the origin sent back.
#[derive(Debug, Clone)]
pub struct OriginResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Capability to perform outbound HTTP calls.
pub trait HttpClient: Send + Sync + 'static {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = ProxyResult<OriginResponse>> + Send;
}
