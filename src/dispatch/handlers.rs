//! Method handlers.
//!
//! Each handler resolves a descriptor into exactly one [`OutboundRequest`].
//! Sending is left to the dispatcher so handlers stay pure.

use crate::client::{Method, OutboundRequest};
use crate::descriptor::{Descriptor, Payload};
use crate::dispatch::HandlerContext;
use crate::error::ProxyResult;

/// GET with forwarded headers and a per-request timeout.
pub fn get(descriptor: &Descriptor, ctx: &HandlerContext) -> ProxyResult<OutboundRequest> {
    Ok(OutboundRequest {
        method: Method::Get,
        url: descriptor.url()?.to_string(),
        headers: descriptor.headers(),
        payload: Payload::None,
        timeout: Some(descriptor.timeout(ctx.default_timeout_secs)),
    })
}

/// POST with the payload the descriptor selects. An unrecognised or absent
/// selector sends no body. No timeout is applied.
pub fn post(descriptor: &Descriptor, _ctx: &HandlerContext) -> ProxyResult<OutboundRequest> {
    Ok(OutboundRequest {
        method: Method::Post,
        url: descriptor.url()?.to_string(),
        headers: descriptor.headers(),
        payload: descriptor.payload(),
        timeout: None,
    })
}
