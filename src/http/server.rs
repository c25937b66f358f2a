//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay and index handlers
//! - Wire up middleware (tracing, body limit, request ID)
//! - Parse inbound descriptors and answer 400 on rejection
//! - Hand validated descriptors to the dispatcher and the result to the relay
//! - Serve until the shutdown broadcast fires

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::client::HttpClient;
use crate::config::ProxyConfig;
use crate::descriptor::{Descriptor, SchemaVariant};
use crate::dispatch::{Dispatcher, HandlerContext};
use crate::error::RequestError;
use crate::http::relay::relay;
use crate::http::X_REQUEST_ID;
use crate::observability::metrics;

/// Application state injected into handlers.
pub struct AppState<C> {
    pub dispatcher: Arc<Dispatcher<C>>,
    pub schema: SchemaVariant,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            schema: self.schema,
        }
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server that sends outbound calls through `client`.
    pub fn new<C: HttpClient>(config: ProxyConfig, client: C) -> Self {
        let context = HandlerContext {
            default_timeout_secs: config.relay.default_timeout_secs,
        };
        let state = AppState {
            dispatcher: Arc::new(Dispatcher::new(client, context)),
            schema: config.relay.schema,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<C: HttpClient>(config: &ProxyConfig, state: AppState<C>) -> Router {
        Router::new()
            .route("/proxy", post(proxy_handler::<C>))
            .route("/", get(index_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving it elsewhere or in tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            schema = ?self.config.relay.schema,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `POST /proxy`: validate the descriptor, dispatch it, relay the result.
async fn proxy_handler<C: HttpClient>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let descriptor = match Descriptor::parse(&body, state.schema) {
        Ok(d) => d,
        Err(err) => {
            let reason = match &err {
                RequestError::MalformedInput(_) => "malformed",
                RequestError::SchemaViolation(_) => "schema",
            };
            tracing::warn!(request_id = %request_id, reason, error = %err, "Rejected descriptor");
            metrics::record_rejection(reason);
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }
    };

    let method = descriptor.method().unwrap_or("unknown").to_string();
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        url = descriptor.url().unwrap_or_default(),
        "Relaying request"
    );

    let response = relay(state.dispatcher.dispatch(&descriptor).await);
    let status = response.status().as_u16();

    metrics::record_request(&method, status, start_time);
    tracing::info!(
        request_id = %request_id,
        method = %method,
        status,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request relayed"
    );

    response
}

/// `GET /`: current local time, ISO-8601.
async fn index_handler() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
