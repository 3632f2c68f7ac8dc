//! HTTP transport used by generated clients.
//!
//! [`HttpClient`] turns one already-built path, the present query pairs and
//! an optional JSON payload into a request, applies the effective
//! [`ClientConfig`], and hands back a [`Reply`]. It never retries.

use percent_encoding::percent_decode_str;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Span, debug, instrument};
use url::Url;

use conduit_define::HttpMethod;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Shared transport for one service client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

impl HttpClient {
    /// Creates a client with the default configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates a client with a base configuration applied to every call.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self::from_parts(reqwest::Client::new(), base_url, config))
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn from_parts(client: reqwest::Client, base_url: Url, config: ClientConfig) -> Self {
        Self {
            client,
            base_url,
            config,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request without a payload.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Status`] for any status outside 200-299, or
    /// [`ClientError::Transport`] if the request fails.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        config: Option<&ClientConfig>,
    ) -> Result<Reply, ClientError> {
        self.execute(method, path, query, None, config).await
    }

    /// Sends a request with a JSON payload.
    ///
    /// ## Errors
    ///
    /// As [`HttpClient::send`], plus [`ClientError::Encode`] if the payload
    /// cannot be serialized.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
        config: Option<&ClientConfig>,
    ) -> Result<Reply, ClientError> {
        let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        self.execute(method, path, query, Some(payload), config)
            .await
    }

    /// Joins the base URL and a path, keeping any base path prefix.
    ///
    /// URL parsing resolves `.` and `..` segments (also percent-encoded), which
    /// would send the call to another route, so such paths are refused.
    fn url_for(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        if path.split('/').any(is_dot_segment) {
            return Err(ClientError::DotSegment {
                path: path.to_string(),
            });
        }
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&joined).map_err(|source| ClientError::InvalidUrl {
            url: joined.clone(),
            source,
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    #[instrument(
        name = "rpc_request",
        skip(self, query, payload, config),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        payload: Option<Vec<u8>>,
        config: Option<&ClientConfig>,
    ) -> Result<Reply, ClientError> {
        let url = self.url_for(path, query)?;
        Span::current().record("http.url", url.as_str());

        let effective = match config {
            Some(overrides) => self.config.merged(overrides),
            None => self.config.clone(),
        };

        let mut request = match method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
        };
        if let Some(timeout) = effective.timeout {
            request = request.timeout(timeout);
        }
        if let Some(user_agent) = &effective.user_agent {
            request = request.header(USER_AGENT, user_agent.as_str());
        }
        for (name, value) in &effective.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(payload) = payload {
            request = request
                .header(CONTENT_TYPE, crate::adapter::JSON_CONTENT_TYPE)
                .body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "request completed");
        Ok(Reply {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    decoded == "." || decoded == ".."
}

/// A successful response, not yet decoded.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    url: String,
    body: Vec<u8>,
}

impl Reply {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the payload as the declared response type.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Decode`] if the payload does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|source| ClientError::Decode {
            url: self.url,
            source,
        })
    }

    /// Discards the payload of a no-content route.
    pub fn empty(self) -> Result<(), ClientError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_keeps_base_prefix() {
        let client = HttpClient::new("http://localhost:8080/api/").unwrap();
        let url = client.url_for("/todos/abc", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/todos/abc");
    }

    #[test]
    fn url_appends_only_given_pairs() {
        let client = HttpClient::new("http://localhost:8080").unwrap();
        let url = client
            .url_for("/todos", &[("completed", "true"), ("q", "a b")])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/todos?completed=true&q=a+b");

        let bare = client.url_for("/todos", &[]).unwrap();
        assert_eq!(bare.query(), None);
    }

    #[test]
    fn dot_segments_are_refused_in_any_spelling() {
        let client = HttpClient::new("http://localhost:8080").unwrap();
        for path in ["/todos/../complete", "/todos/./complete", "/todos/%2e%2E", "/x/.%2e", "/%2E"] {
            assert!(
                matches!(client.url_for(path, &[]), Err(ClientError::DotSegment { .. })),
                "{path} should be refused"
            );
        }
        assert!(client.url_for("/files/...", &[]).is_ok());
        assert!(client.url_for("/files/.env", &[]).is_ok());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn send_records_request_span() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"pong\""))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&mock_server.uri()).unwrap();
        let reply = client
            .send(HttpMethod::Get, "/ping", &[], None)
            .await
            .unwrap();

        assert_eq!(reply.json::<String>().unwrap(), "pong");
        assert!(logs_contain("rpc_request"));
        assert!(logs_contain("request completed"));
    }

    #[test]
    fn reply_decode_failure_is_distinct() {
        let reply = Reply {
            status: 200,
            url: "http://localhost/todos".to_string(),
            body: b"<html>".to_vec(),
        };
        let err = reply.json::<Vec<String>>().unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
