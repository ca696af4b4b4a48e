//! HTTP transports used by the fetch client.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::error::FetchError;

/// An outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Absolute URL.
    pub url: String,
    /// Request headers in insertion order.
    pub headers: Vec<(String, String)>,
}

impl OutboundRequest {
    /// Create a request without headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is a client or server error.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Platform HTTP stack behind the fetch client.
///
/// Spin futures are not `Send`, so neither are these.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Perform a GET request.
    async fn get(&self, request: &OutboundRequest) -> Result<RawResponse, FetchError>;
}

/// Spin outbound HTTP.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl HttpTransport for SpinTransport {
    async fn get(&self, request: &OutboundRequest) -> Result<RawResponse, FetchError> {
        let mut builder = spin_sdk::http::Request::get(request.url.as_str());
        for (name, value) in &request.headers {
            builder.header(name.as_str(), value.as_str());
        }
        let outbound = builder.build();

        let response: spin_sdk::http::Response = spin_sdk::http::send(outbound)
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(RawResponse {
            status: *response.status(),
            body: response.body().to_vec(),
        })
    }
}

/// Transport that answers every request with the same response.
///
/// Records the requests it receives so callers can inspect them.
#[derive(Debug)]
pub struct StaticTransport {
    response: Result<RawResponse, String>,
    requests: RefCell<Vec<OutboundRequest>>,
}

impl StaticTransport {
    /// Always answer 200 with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(200, body)
    }

    /// Always answer with the given status and body.
    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(RawResponse {
                status,
                body: body.into(),
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Always fail at the connection level.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for StaticTransport {
    async fn get(&self, request: &OutboundRequest) -> Result<RawResponse, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        self.response.clone().map_err(FetchError::Request)
    }
}
