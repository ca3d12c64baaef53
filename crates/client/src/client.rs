//! HTTP client for the TradeLedger REST API.
//!
//! The service traits from `tradeledger-core` are implemented on
//! [`ApiClient`] in the sibling `auth`, `portfolios`, `positions`, `trades`
//! and `users` modules.

use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use tradeledger_core::errors::{ApiError, Error, Result};

use crate::cache::QueryCache;
use crate::config::ClientConfig;
use crate::session::{Session, SessionStore};

/// Longest slice of an unparsed error body quoted in an error message.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client for the TradeLedger API.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MemorySessionStore::new());
/// let client = ApiClient::new(ClientConfig::default(), store)?;
/// client.login(credentials).await?;
/// let trades = client.list_open_trades().await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    cache: Arc<QueryCache>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            cache: Arc::new(QueryCache::new(config.cache_ttl)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// The stored session, as last saved.
    pub fn session(&self) -> Result<Session> {
        self.session.load()
    }

    pub(crate) fn save_session(&self, session: &Session) -> Result<()> {
        self.session.save(session)
    }

    pub(crate) fn clear_session(&self) -> Result<()> {
        self.session.clear()
    }

    /// Create headers for an API request, with the bearer token when signed in.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.load()?.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Session(format!("Invalid access token format: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body of a successful response.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String> {
        let url = self.url(path);
        debug!("[Api] {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        self.read_response(response).await
    }

    /// Read an HTTP response body, turning failures into [`ApiError`]s.
    async fn read_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(status, &body);
        warn!("[Api] {} {}", status.as_u16(), message);

        let err = match status {
            StatusCode::UNAUTHORIZED => {
                info!("[Api] Unauthorized response, clearing stored session");
                if let Err(e) = self.session.clear() {
                    warn!("[Api] Failed to clear session: {}", e);
                }
                ApiError::Unauthorized(message)
            }
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        };
        Err(err.into())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send::<()>(Method::GET, path, None).await?;
        decode(&body)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::POST, path, Some(body)).await?;
        decode(&body)
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send::<()>(Method::POST, path, None).await?;
        decode(&body)
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PUT, path, Some(body)).await?;
        decode(&body)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PATCH, path, Some(body)).await?;
        decode(&body)
    }

    /// DELETE, ignoring whatever the server sends back.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Decode a response body. An empty body decodes as JSON `null`, so unit
/// and `Option` targets accept `204 No Content`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| {
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
        Error::Api(ApiError::Decode(format!("{} - {}", e, preview)))
    })
}

/// Best message for a failed response: the server's `message`, `error` or
/// `detail` field, else the raw body, else the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error", "detail"] {
            match map.get(field) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    }
    trimmed.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn test_client_url_normalization() {
        let config = ClientConfig::default().with_base_url("http://localhost:8000/api/");
        let client = ApiClient::new(config, Arc::new(MemorySessionStore::new())).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/trades"), "http://localhost:8000/api/trades");
    }

    #[test]
    fn test_headers_carry_bearer_token() {
        let store = Arc::new(MemorySessionStore::with_session(Session {
            user: None,
            token: Some("abc".to_string()),
            refresh_token: None,
        }));
        let client = ApiClient::new(ClientConfig::default(), store).unwrap();
        let headers = client.headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");

        let anonymous =
            ApiClient::new(ClientConfig::default(), Arc::new(MemorySessionStore::new())).unwrap();
        assert!(anonymous.headers().unwrap().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_error_message_field_precedence() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"message": "Invalid symbol", "error": "x"}"#),
            "Invalid symbol"
        );
        assert_eq!(error_message(status, r#"{"error": "Bad input"}"#), "Bad input");
        assert_eq!(error_message(status, r#"{"detail": "Nope"}"#), "Nope");
        assert_eq!(
            error_message(status, r#"{"detail": [{"loc": ["body"]}]}"#),
            r#"[{"loc":["body"]}]"#
        );
        assert_eq!(error_message(status, "plain failure"), "plain failure");
        assert_eq!(error_message(status, ""), "Bad Request");
    }

    #[test]
    fn test_decode_empty_body() {
        decode::<()>("").unwrap();
        let missing: Option<i32> = decode("  ").unwrap();
        assert_eq!(missing, None);
        assert!(matches!(
            decode::<i32>("not json"),
            Err(Error::Api(ApiError::Decode(_)))
        ));
    }
}
