//! In-memory client for unit tests.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};

use crate::client::{HttpClient, OriginResponse, OutboundRequest};
use crate::error::{ProxyError, ProxyResult};

/// Records every outbound request and answers with a canned response.
#[derive(Clone)]
pub struct RecordingClient {
    pub requests: Arc<Mutex<Vec<OutboundRequest>>>,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub failure: Option<String>,
}

impl RecordingClient {
    pub fn ok(body: &'static str) -> Self {
        Self {
            requests: Arc::default(),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::ok("")
        }
    }

    pub fn recorded(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for RecordingClient {
    async fn send(&self, request: OutboundRequest) -> ProxyResult<OriginResponse> {
        self.requests.lock().unwrap().push(request);
        if let Some(message) = &self.failure {
            return Err(ProxyError::Transport(message.clone()));
        }
        Ok(OriginResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
        })
    }
}
