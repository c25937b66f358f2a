//! `reqwest`-backed [`HttpClient`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::client::{HttpClient, OriginResponse, OutboundRequest};
use crate::config::ClientConfig;
use crate::descriptor::Payload;
use crate::error::{ProxyError, ProxyResult};

/// Pooled outbound client shared by all inbound calls.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(idle) = config.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(idle);
        }
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }
}

impl HttpClient for ReqwestClient {
    async fn send(&self, request: OutboundRequest) -> ProxyResult<OriginResponse> {
        let url = Url::parse(&request.url).map_err(|source| ProxyError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;
        let headers = header_map(&request.headers)?;

        let mut builder = self
            .inner
            .request(request.method.into(), url)
            .headers(headers);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match &request.payload {
            Payload::None => builder,
            Payload::Form(pairs) => builder.form(pairs),
            Payload::Json(value) => builder.json(value),
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(OriginResponse {
            status,
            headers,
            body,
        })
    }
}

/// Convert descriptor headers, keeping repeated names.
fn header_map(headers: &[(String, String)]) -> ProxyResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ProxyError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ProxyError::InvalidHeader(name.clone()))?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

/// Flatten the error chain; reqwest's top-level message omits the cause.
fn transport_error(err: reqwest::Error) -> ProxyError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    ProxyError::Transport(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Method;

    fn request(url: &str, headers: Vec<(&str, &str)>) -> OutboundRequest {
        OutboundRequest {
            method: Method::Get,
            url: url.to_string(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            payload: Payload::None,
            timeout: None,
        }
    }

    #[test]
    fn test_header_map_keeps_repeats() {
        let headers = vec![
            ("Accept".to_string(), "text/html".to_string()),
            ("x-tag".to_string(), "a".to_string()),
            ("x-tag".to_string(), "b".to_string()),
        ];
        let map = header_map(&headers).unwrap();
        assert_eq!(map.get("accept").unwrap(), "text/html");
        assert_eq!(map.get_all("x-tag").iter().count(), 2);
    }

    #[test]
    fn test_header_map_rejects_invalid_name() {
        let headers = vec![("bad header".to_string(), "v".to_string())];
        let err = header_map(&headers).unwrap_err();
        assert_eq!(err.to_string(), "invalid header 'bad header'");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = ReqwestClient::new(&ClientConfig::default()).unwrap();
        let err = client.send(request("not a url", vec![])).await.unwrap_err();
        assert!(matches!(err, ProxyError::InvalidUrl { .. }));
        assert!(err.to_string().starts_with("invalid url 'not a url'"));
    }

    #[tokio::test]
    async fn test_invalid_header_value_is_rejected() {
        let client = ReqwestClient::new(&ClientConfig::default()).unwrap();
        let err = client
            .send(request("http://127.0.0.1:9/", vec![("x-bad", "line\nbreak")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidHeader(ref name) if name == "x-bad"));
    }
}
