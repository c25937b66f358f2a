//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use http_relay::{HttpServer, ProxyConfig, ReqwestClient, Shutdown};
use tokio::net::TcpListener;

/// A request as the origin saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type Captures = Arc<Mutex<Vec<Captured>>>;

/// Start a mock origin on an ephemeral port.
///
/// Paths:
/// - `/headers`: answers with internal, hop-by-hop and allow-listed headers
/// - `/status/{code}`: answers with that status
/// - `/slow`: answers after five seconds
/// - anything else: `200 ok`
pub async fn start_origin() -> (SocketAddr, Captures) {
    let captures: Captures = Arc::default();
    let app = Router::new().fallback(origin).with_state(captures.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, captures)
}

async fn origin(
    State(captures): State<Captures>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    captures.lock().unwrap().push(Captured {
        method,
        uri,
        headers,
        body,
    });

    if path == "/headers" {
        let mut headers = HeaderMap::new();
        headers.append("x-internal-token", HeaderValue::from_static("secret"));
        headers.append("content-type", HeaderValue::from_static("text/plain"));
        headers.append("set-cookie", HeaderValue::from_static("session=abc"));
        headers.append("set-cookie", HeaderValue::from_static("theme=dark"));
        headers.append("x-powered-by", HeaderValue::from_static("origin"));
        return (StatusCode::OK, headers, "with headers").into_response();
    }
    if path == "/slow" {
        tokio::time::sleep(Duration::from_secs(5)).await;
        return "late".into_response();
    }
    if let Some(code) = path.strip_prefix("/status/") {
        let status = code
            .parse::<u16>()
            .ok()
            .and_then(|c| StatusCode::from_u16(c).ok())
            .unwrap_or(StatusCode::BAD_REQUEST);
        return (status, format!("status {code}")).into_response();
    }
    "ok".into_response()
}

/// Start the relay with `config` on an ephemeral port.
pub async fn start_relay(mut config: ProxyConfig) -> (SocketAddr, Shutdown) {
    config.client.no_proxy = true;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = ReqwestClient::new(&config.client).unwrap();
    let server = HttpServer::new(config, client);
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Caller-side client that never goes through an environment proxy.
pub fn caller() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// POST a descriptor to the relay.
pub async fn post_descriptor(relay: SocketAddr, descriptor: serde_json::Value) -> reqwest::Response {
    caller()
        .post(format!("http://{relay}/proxy"))
        .json(&descriptor)
        .send()
        .await
        .expect("relay unreachable")
}
