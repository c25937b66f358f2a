//! JSON-described HTTP relay library.
//!
//! A caller posts a request descriptor to `/proxy`; the relay validates it,
//! performs the described call against the origin and relays the origin's
//! status, allow-listed headers and body back.

// Core subsystems
pub mod client;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use client::{HttpClient, ReqwestClient};
pub use config::ProxyConfig;
pub use descriptor::{Descriptor, SchemaVariant};
pub use error::{ProxyError, RequestError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
