//! HTTP transport shared by the provider clients.
//!
//! A [`Transport`] binds a base URL, a [`SecuritySource`] and a
//! `reqwest::Client`. Operations are described by [`Operation`] values; the
//! transport consults the security source for every operation that requires
//! bearer authentication, immediately before sending.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use taskbridge_core::ProviderKind;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::security::{OperationId, SecuritySource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the HTTP sender underneath a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent string sent with every request.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("taskbridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Authentication requirement of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    /// No credential is attached.
    None,
    /// `Authorization: Bearer` from the client's security source.
    Bearer,
}

/// Static description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub id: OperationId,
    pub method: HttpMethod,
    pub security: Security,
}

impl Operation {
    /// An operation that requires a bearer credential.
    pub const fn bearer(id: &'static str, method: HttpMethod) -> Self {
        Self {
            id: OperationId::new(id),
            method,
            security: Security::Bearer,
        }
    }

    /// An operation sent without credentials.
    pub const fn public(id: &'static str, method: HttpMethod) -> Self {
        Self {
            id: OperationId::new(id),
            method,
            security: Security::None,
        }
    }
}

/// HTTP sender bound to one provider's base URL and security source.
///
/// Cloning is cheap and clones share the same security source and connection
/// pool.
#[derive(Debug, Clone)]
pub struct Transport {
    provider: ProviderKind,
    base_url: Url,
    security: Arc<dyn SecuritySource>,
    http: reqwest::Client,
}

impl Transport {
    /// Builds a transport. No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns a `Construction` error if `base_url` is not an absolute
    /// http(s) URL or the HTTP client cannot be created.
    pub(crate) fn new(
        provider: ProviderKind,
        base_url: &str,
        security: Arc<dyn SecuritySource>,
        config: &TransportConfig,
    ) -> ProviderResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ProviderError::construction(format!("invalid base URL `{}`", base_url))
                .with_provider(provider)
                .with_source(e)
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ProviderError::construction(format!(
                "base URL `{}` must be an absolute http(s) URL",
                base_url
            ))
            .with_provider(provider));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                ProviderError::construction("failed to create HTTP client")
                    .with_provider(provider)
                    .with_source(e)
            })?;

        Ok(Self {
            provider,
            base_url,
            security,
            http,
        })
    }

    /// The provider this transport talks to.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// The base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The security source consulted for authenticated operations.
    pub fn security(&self) -> &Arc<dyn SecuritySource> {
        &self.security
    }

    /// Starts a call to `operation` at `path`, relative to the base URL.
    ///
    /// Path segments taken from user input must already be percent-encoded
    /// (see [`encode_segment`]).
    pub fn call(&self, operation: Operation, path: &str) -> Call<'_> {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Call {
            transport: self,
            operation,
            url,
            query: Vec::new(),
            body: None,
        }
    }
}

/// Percent-encodes one path segment.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Returns the cursor to request next, or `None` once pagination is over.
///
/// An empty cursor, or the one just requested, ends the walk.
pub(crate) fn next_cursor(current: Option<&str>, next: Option<String>) -> Option<String> {
    next.filter(|next| !next.is_empty() && Some(next.as_str()) != current)
}

/// A request being assembled for one operation.
#[derive(Debug)]
#[must_use = "a call does nothing until it is sent"]
pub struct Call<'a> {
    transport: &'a Transport,
    operation: Operation,
    url: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl Call<'_> {
    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter when `value` is set.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Sets a JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ProviderResult<Self> {
        let encoded = serde_json::to_vec(body).map_err(|e| {
            ProviderError::bad_request(format!(
                "failed to encode request body for {}",
                self.operation.id
            ))
            .with_provider(self.transport.provider)
            .with_source(e)
        })?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Sends the request and decodes a JSON response body.
    pub async fn send<T: DeserializeOwned>(self) -> ProviderResult<T> {
        let provider = self.transport.provider;
        let id = self.operation.id;
        let body = self.execute().await?;

        serde_json::from_slice(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse {} response: {}", id, e))
                .with_provider(provider)
        })
    }

    /// Sends the request and discards any response body.
    pub async fn send_empty(self) -> ProviderResult<()> {
        self.execute().await.map(|_| ())
    }

    async fn execute(self) -> ProviderResult<Vec<u8>> {
        let transport = self.transport;
        let provider = transport.provider;
        let operation = self.operation;

        let mut url = Url::parse(&self.url).map_err(|e| {
            ProviderError::bad_request(format!("invalid request URL `{}`", self.url))
                .with_provider(provider)
                .with_source(e)
        })?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        let mut request = transport
            .http
            .request(operation.method.to_reqwest(), url.clone());

        if operation.security == Security::Bearer {
            let credential = transport
                .security
                .credential_for(operation.id)
                .map_err(|e| e.with_provider(provider))?;
            request = request.bearer_auth(credential.token());
        }

        if let Some(body) = self.body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        debug!(
            provider = %provider,
            operation = %operation.id,
            method = operation.method.as_str(),
            url = %url,
            "sending request"
        );

        let response = request.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                ProviderError::network("request timeout")
            } else if e.is_connect() {
                ProviderError::network(format!("connection failed: {}", e))
            } else {
                ProviderError::network(format!("request failed: {}", e))
            };
            err.with_provider(provider)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                provider = %provider,
                operation = %operation.id,
                status = status.as_u16(),
                "request failed"
            );
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after, &body)
                .with_provider(provider)
                .with_status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e)).with_provider(provider)
        })?;
        Ok(bytes.to_vec())
    }
}

/// Maps a non-success status to an error category.
fn status_error(
    status: reqwest::StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> ProviderError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => {
            ProviderError::authentication("access token expired or invalid")
        }
        reqwest::StatusCode::FORBIDDEN => ProviderError::authorization("access denied"),
        reqwest::StatusCode::NOT_FOUND => ProviderError::not_found("resource not found"),
        reqwest::StatusCode::BAD_REQUEST => {
            ProviderError::bad_request(format!("bad request: {}", body))
        }
        reqwest::StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(format!(
            "rate limit exceeded{}",
            retry_after
                .map(|s| format!(", retry after {} seconds", s))
                .unwrap_or_default()
        )),
        _ => ProviderError::server(format!("API error ({}): {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::security::StaticToken;

    fn transport(base_url: &str) -> ProviderResult<Transport> {
        Transport::new(
            ProviderKind::Todoist,
            base_url,
            Arc::new(StaticToken::new("tok")),
            &TransportConfig::default(),
        )
    }

    #[test]
    fn rejects_malformed_base_urls() {
        for bad in ["", "not a url", "ftp://example.com/api", "mailto:someone@example.com"] {
            let err = transport(bad).unwrap_err();
            assert_eq!(err.code(), ProviderErrorCode::Construction, "{}", bad);
            assert_eq!(err.provider(), Some(ProviderKind::Todoist));
        }
    }

    #[test]
    fn next_cursor_stops_on_empty_or_repeated() {
        assert_eq!(next_cursor(None, Some("c2".into())), Some("c2".into()));
        assert_eq!(next_cursor(Some("c2"), Some("c3".into())), Some("c3".into()));
        assert_eq!(next_cursor(Some("c2"), None), None);
        assert_eq!(next_cursor(None, Some(String::new())), None);
        assert_eq!(next_cursor(Some("c2"), Some("c2".into())), None);
    }

    #[test]
    fn call_joins_paths_under_base() {
        let transport = transport("https://api.todoist.com/api/v1").unwrap();
        let op = Operation::bearer("getTask", HttpMethod::Get);

        let call = transport.call(op, "/tasks/123");
        assert_eq!(call.url, "https://api.todoist.com/api/v1/tasks/123");

        let call = transport.call(op, "tasks");
        assert_eq!(call.url, "https://api.todoist.com/api/v1/tasks");
    }

    #[test]
    fn query_opt_skips_none() {
        let transport = transport("https://api.todoist.com/api/v1").unwrap();
        let call = transport
            .call(Operation::bearer("getTasks", HttpMethod::Get), "tasks")
            .query_opt("project_id", Some("p1"))
            .query_opt::<String>("cursor", None);
        assert_eq!(call.query, vec![("project_id".to_string(), "p1".to_string())]);
    }

    #[test]
    fn encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("MTIzNDU2"), "MTIzNDU2");
    }

    #[test]
    fn status_mapping() {
        use reqwest::StatusCode;
        let cases = [
            (StatusCode::UNAUTHORIZED, ProviderErrorCode::AuthenticationFailed),
            (StatusCode::FORBIDDEN, ProviderErrorCode::AuthorizationFailed),
            (StatusCode::NOT_FOUND, ProviderErrorCode::NotFound),
            (StatusCode::BAD_REQUEST, ProviderErrorCode::BadRequest),
            (StatusCode::TOO_MANY_REQUESTS, ProviderErrorCode::RateLimited),
            (StatusCode::BAD_GATEWAY, ProviderErrorCode::ServerError),
        ];
        for (status, code) in cases {
            assert_eq!(status_error(status, None, "").code(), code);
        }

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, Some(12), "");
        assert!(err.message().contains("retry after 12 seconds"));
    }

    #[test]
    fn default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("taskbridge/"));

        let config = config
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("host-app/2.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "host-app/2.0");
    }
}
