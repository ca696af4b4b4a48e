//! Fetch client with default headers.

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::transport::{HttpTransport, OutboundRequest};

/// Client for the catalog API.
///
/// Issues a single GET per call: no timeout wrapper and no retries.
pub struct FetchClient<T: HttpTransport> {
    transport: T,
    default_headers: Vec<(String, String)>,
}

impl<T: HttpTransport> FetchClient<T> {
    /// Create a new fetch client over a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_headers: Vec::new(),
        }
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Fetch a URL and return the body as text.
    ///
    /// Statuses of 400 and above are errors.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let mut request = OutboundRequest::get(url);
        for (name, value) in &self.default_headers {
            request = request.header(name.clone(), value.clone());
        }

        let response = self.transport.get(&request).await?;
        if response.is_error() {
            return Err(FetchError::Http {
                status: response.status,
                url: url.to_string(),
            });
        }

        String::from_utf8(response.body).map_err(|e| FetchError::Encoding(e.to_string()))
    }

    /// Fetch a URL and decode the JSON body.
    pub async fn fetch_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, FetchError> {
        let body = self.fetch_text(url).await?;
        decode_json(&body)
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Decode a JSON document.
pub fn decode_json<D: DeserializeOwned>(body: &str) -> Result<D, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::StaticTransport;
    use futures::executor::block_on;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Envelope {
        data: Inner,
    }

    #[derive(Debug, Deserialize)]
    struct Inner {
        title: String,
    }

    const URL: &str = "https://api.example.com/products/ielts-course?lang=en";

    #[test]
    fn test_sends_default_headers() {
        let client = FetchClient::new(StaticTransport::ok(r#"{"data":{"title":"IELTS Course"}}"#))
            .with_default_header("X-TENMS-SOURCE-PLATFORM", "web");

        let envelope: Envelope = block_on(client.fetch_json(URL)).unwrap();
        assert_eq!(envelope.data.title, "IELTS Course");

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, URL);
        assert_eq!(requests[0].header_value("x-tenms-source-platform"), Some("web"));
    }

    #[test]
    fn test_http_error_status() {
        let client = FetchClient::new(StaticTransport::with_status(503, "unavailable"));

        let err = block_on(client.fetch_text(URL)).unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 503, .. }));
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_connection_error_is_not_retried() {
        let client = FetchClient::new(StaticTransport::failing("connection refused"));

        let err = block_on(client.fetch_text(URL)).unwrap_err();
        assert!(matches!(err, FetchError::Request(msg) if msg == "connection refused"));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[test]
    fn test_malformed_json() {
        let client = FetchClient::new(StaticTransport::ok("<html>oops</html>"));

        let result: Result<Envelope, _> = block_on(client.fetch_json(URL));
        assert!(matches!(result, Err(FetchError::Deserialization(_))));
    }

    #[test]
    fn test_non_utf8_body() {
        let client = FetchClient::new(StaticTransport::ok(vec![0xff_u8, 0xfe]));

        let result = block_on(client.fetch_text(URL));
        assert!(matches!(result, Err(FetchError::Encoding(_))));
    }
}
