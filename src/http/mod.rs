//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, POST /proxy and GET /)
//!     → descriptor parse + validation (400 on failure)
//!     → dispatch (method table, one outbound call)
//!     → relay.rs (status, allow-listed headers, body; 500 on failure)
//!     → Send to caller
//! ```

pub mod relay;
pub mod server;

pub use relay::{relay, RELAYED_HEADERS};
pub use server::HttpServer;

/// Header carrying the per-call request ID (logged, never relayed).
pub const X_REQUEST_ID: &str = "x-request-id";
