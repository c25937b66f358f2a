//! Method dispatch.
//!
//! # Data Flow
//! ```text
//! Descriptor
//!     → meta.method (required)
//!     → HANDLERS table lookup (UnsupportedMethod when absent)
//!     → handler builds one OutboundRequest
//!     → HttpClient::send
//! ```
//!
//! # Design Decisions
//! - The table is partial: PUT and DELETE are accepted by the strict
//!   contract but have no handler, so they fail here rather than at validation
//! - Method tokens are matched case-sensitively

pub mod handlers;

use crate::client::{HttpClient, Method, OriginResponse, OutboundRequest};
use crate::descriptor::Descriptor;
use crate::error::{ProxyError, ProxyResult};

/// Settings handlers may consult.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    /// Timeout applied to GET when `meta.timeout` is absent.
    pub default_timeout_secs: u64,
}

impl Default for HandlerContext {
    fn default() -> Self {
        Self {
            default_timeout_secs: 10,
        }
    }
}

/// A handler turns a descriptor into a single outbound request.
pub type HandlerFn = fn(&Descriptor, &HandlerContext) -> ProxyResult<OutboundRequest>;

const HANDLERS: &[(Method, HandlerFn)] = &[
    (Method::Get, handlers::get as HandlerFn),
    (Method::Post, handlers::post as HandlerFn),
];

/// Find the handler for a raw method token.
pub fn handler_for(token: &str) -> ProxyResult<HandlerFn> {
    Method::from_token(token)
        .and_then(|method| {
            HANDLERS
                .iter()
                .find(|(m, _)| *m == method)
                .map(|(_, handler)| *handler)
        })
        .ok_or_else(|| ProxyError::UnsupportedMethod(token.to_string()))
}

/// Dispatches descriptors to handlers and sends the result.
pub struct Dispatcher<C> {
    client: C,
    context: HandlerContext,
}

impl<C: HttpClient> Dispatcher<C> {
    pub fn new(client: C, context: HandlerContext) -> Self {
        Self { client, context }
    }

    /// Resolve and perform the outbound call for `descriptor`.
    pub async fn dispatch(&self, descriptor: &Descriptor) -> ProxyResult<OriginResponse> {
        let handler = handler_for(descriptor.method()?)?;
        let request = handler(descriptor, &self.context)?;

        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            timeout = ?request.timeout,
            "Sending outbound request"
        );

        self.client.send(request).await
    }
}
