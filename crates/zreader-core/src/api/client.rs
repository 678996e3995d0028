//! Request dispatcher for the Z Reader REST API.
//!
//! `ApiClient::send` merges session headers into each request, parses the
//! reply into an `Envelope`, and intercepts the session-expired code.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::{ApiError, Envelope, RequestOptions};
use crate::auth::SessionStore;

// ============================================================================
// Constants
// ============================================================================

/// Development proxy in front of the backend (debug builds)
const DEV_BASE_URL: &str = "http://localhost:5173";

/// Deployed backend host (release builds)
const PROD_BASE_URL: &str = "http://localhost:8080";

/// Header carrying the raw session token. Not a bearer scheme.
pub const AUTH_HEADER: &str = "Authentication";

const USER_AGENT: &str = concat!("zreader/", env!("CARGO_PKG_VERSION"));

/// Placeholder written in place of the token in diagnostics
const REDACTED: &str = "<redacted>";

/// Base address chosen at build time.
///
/// `ZREADER_API_BASE_URL` set during compilation wins; otherwise debug builds
/// talk to the development proxy and release builds to the deployed host.
pub fn default_base_url() -> &'static str {
    match option_env!("ZREADER_API_BASE_URL") {
        Some(url) => url,
        None if cfg!(debug_assertions) => DEV_BASE_URL,
        None => PROD_BASE_URL,
    }
}

#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Transport timeout. Without one, reqwest's default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self, session: Arc<dyn SessionStore>) -> Result<ApiClient, ApiError> {
        let raw = self.base_url.as_deref().unwrap_or_else(|| default_base_url());
        let mut base_url =
            Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path().trim_end_matches('/'));
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ApiClient {
            http: builder.build()?,
            base_url,
            session,
        })
    }
}

/// API client for the Z Reader backend.
/// Clone is cheap - the reqwest pool and the session store are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    pub(crate) session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client against the build-time base address
    pub fn new(session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        ClientBuilder::new().build(session)
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Send one request and return the parsed envelope.
    ///
    /// Every reply is parsed as an envelope whatever its HTTP status. Network
    /// and parse failures are returned as errors. If the envelope carries the
    /// session-expired code, the session store is cleared and
    /// `ApiError::SessionExpired` is returned instead of the envelope.
    pub async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError> {
        self.dispatch(path, options)
            .await
            .inspect_err(|e| debug!(path = path, error = %e, "API request failed"))
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.endpoint(path)?;
        let headers = self.request_headers(&options.headers)?;

        debug!(
            method = %options.method,
            url = %url,
            headers = ?redact_headers(&headers),
            "Sending API request"
        );

        let mut request = self.http.request(options.method, url.clone()).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let raw: Envelope<Value> = serde_json::from_slice(&bytes).map_err(|e| {
            let body = String::from_utf8_lossy(&bytes);
            ApiError::InvalidResponse(format!(
                "Status {}: {} ({})",
                status,
                ApiError::truncate_body(&body),
                e
            ))
        })?;

        debug!(
            url = %url,
            status = %status,
            code = %raw.code,
            message = %raw.message,
            "Received API response"
        );

        if raw.is_session_expired() {
            warn!(url = %url, "Session expired, clearing stored session");
            if let Err(e) = self.session.clear() {
                error!(error = %e, "Failed to clear session store");
            }
            return Err(ApiError::SessionExpired);
        }

        raw.decode()
    }

    /// Resolve a server-relative path. Anything that resolves to another
    /// origin is rejected so the session token never leaves the backend.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;
        if url.origin() != self.base_url.origin() {
            return Err(ApiError::InvalidUrl(format!(
                "{}: not a path on {}",
                path,
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    /// Default headers, then the session token, then caller overrides.
    fn request_headers(&self, overrides: &HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        if let Some(token) = self.session.token()? {
            headers.insert(auth_header_name(), HeaderValue::from_str(&token)?);
        }

        for name in overrides.keys() {
            headers.remove(name);
        }
        for (name, value) in overrides {
            headers.append(name.clone(), value.clone());
        }

        Ok(headers)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(path, RequestOptions::get()).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(path, RequestOptions::post().json(body)?).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(path, RequestOptions::put().json(body)?).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(path, RequestOptions::delete()).await
    }
}

fn auth_header_name() -> HeaderName {
    HeaderName::from_static("authentication")
}

/// Header list for diagnostics with the token value hidden
fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    let auth = auth_header_name();
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if *name == auth {
                REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;

    fn client_with(store: MemorySessionStore, base: &str) -> ApiClient {
        ClientBuilder::new()
            .base_url(base)
            .build(Arc::new(store))
            .expect("build client")
    }

    #[test]
    fn test_auth_header_name_matches_constant() {
        assert!(auth_header_name().as_str().eq_ignore_ascii_case(AUTH_HEADER));
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = client_with(MemorySessionStore::new(), "https://reader.example.com/backend");
        let url = client.endpoint("/api/auth/login").expect("endpoint");
        assert_eq!(url.as_str(), "https://reader.example.com/backend/api/auth/login");

        let client = client_with(MemorySessionStore::new(), "http://localhost:8080");
        let url = client.endpoint("api/auth/current-user").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:8080/api/auth/current-user");
    }

    #[test]
    fn test_endpoint_rejects_other_origins() {
        let client = client_with(MemorySessionStore::new(), "http://localhost:8080");

        for path in [
            "https://evil.example/steal",
            "http://localhost:9090/api/auth/current-user",
            "https://localhost:8080/api",
        ] {
            assert!(
                matches!(client.endpoint(path), Err(ApiError::InvalidUrl(_))),
                "{} should be rejected",
                path
            );
        }
        assert!(client.endpoint("/api/setting/category/list").is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = ClientBuilder::new()
            .base_url("not a url")
            .build(Arc::new(MemorySessionStore::new()));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_headers_without_token() {
        let client = client_with(MemorySessionStore::new(), "http://localhost:8080");
        let headers = client.request_headers(&HeaderMap::new()).expect("headers");

        assert_eq!(headers.get(header::CONTENT_TYPE).expect("content type"), "application/json");
        assert!(headers.get(AUTH_HEADER).is_none());
    }

    #[test]
    fn test_headers_with_token_and_overrides() {
        let client = client_with(MemorySessionStore::with_token("tok123"), "http://localhost:8080");

        let mut overrides = HeaderMap::new();
        overrides.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        overrides.insert("x-trace", HeaderValue::from_static("abc"));
        let headers = client.request_headers(&overrides).expect("headers");

        assert_eq!(headers.get(AUTH_HEADER).expect("auth header"), "tok123");
        assert_eq!(headers.get(header::CONTENT_TYPE).expect("content type"), "text/plain");
        assert_eq!(headers.get_all(header::CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers.get("x-trace").expect("extra header"), "abc");
    }

    #[test]
    fn test_caller_can_override_auth_header() {
        let client = client_with(MemorySessionStore::with_token("stored"), "http://localhost:8080");

        let mut overrides = HeaderMap::new();
        overrides.insert(auth_header_name(), HeaderValue::from_static("explicit"));
        let headers = client.request_headers(&overrides).expect("headers");

        assert_eq!(headers.get(AUTH_HEADER).expect("auth header"), "explicit");
    }

    #[test]
    fn test_redact_headers_hides_token() {
        let client = client_with(
            MemorySessionStore::with_token("secret-token"),
            "http://localhost:8080",
        );
        let headers = client.request_headers(&HeaderMap::new()).expect("headers");
        let redacted = redact_headers(&headers);

        assert!(redacted.iter().all(|(_, v)| v != "secret-token"));
        assert!(redacted
            .iter()
            .any(|(k, v)| k == "authentication" && v == REDACTED));
    }

    #[test]
    fn test_default_base_url_is_valid() {
        assert!(Url::parse(default_base_url()).is_ok());
    }

    #[test]
    fn test_new_uses_build_time_base_url() {
        let client = ApiClient::new(Arc::new(MemorySessionStore::new())).expect("build client");
        let expected = Url::parse(default_base_url()).expect("default url");
        assert_eq!(client.base_url().origin(), expected.origin());
        assert!(client.base_url().path().ends_with('/'));
    }
}
