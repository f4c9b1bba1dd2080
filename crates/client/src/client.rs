//! The HTTP client wrapping all calls to the backend.

use crate::auth::UnauthorizedHandler;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::token::TokenStore;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the sprintdeck REST backend.
///
/// Every outbound request picks up the bearer token from the store when
/// one is present. Every response is inspected on the way back: a 401
/// purges the stored credential and fires the unauthorized handler, then
/// the error is still returned to the caller so local handling occurs.
/// Calls are never retried; one failed call fails once.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

impl ApiClient {
    /// Build a client from the given configuration and collaborators.
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            on_unauthorized,
        })
    }

    /// The base URL requests are joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        self.send(self.http.get(self.url(path))).await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        debug!("GET {} ({} params)", path, params.len());
        self.send(self.http.get(self.url(path)).query(params)).await
    }

    /// POST a JSON body, decoding the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("POST {}", path);
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    /// PUT a JSON body, decoding the JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("PUT {}", path);
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    /// DELETE a resource. Any response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<()> {
        debug!("DELETE {}", path);
        self.dispatch(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        let body = self.dispatch(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Run one request through both interceptors and return the raw body.
    async fn dispatch(&self, mut builder: reqwest::RequestBuilder) -> Result<String> {
        if let Some(token) = self.tokens.get() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(self.status_error(status, &body));
        }
        Ok(body)
    }

    /// Turn a non-2xx response into an error, applying the authorization
    /// side effects first.
    fn status_error(&self, status: StatusCode, body: &str) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            warn!("authorization failure, purging stored credential");
            self.tokens.clear();
            self.on_unauthorized.session_expired();
        }

        ApiError::Status {
            status: status.as_u16(),
            detail: extract_detail(body),
        }
    }
}

/// Pull the server's `detail` field out of an error body. The backend
/// reports application-level failures as `{"detail": ...}`; anything else
/// reads as no detail.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Probe {
        fired: AtomicUsize,
    }

    impl Probe {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fired: AtomicUsize::new(0),
            })
        }
    }

    impl UnauthorizedHandler for Probe {
        fn session_expired(&self) {
            self.fired.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn client_with(
        tokens: Arc<dyn TokenStore>,
        handler: Arc<dyn UnauthorizedHandler>,
    ) -> ApiClient {
        ApiClient::new(&ClientConfig::default(), tokens, handler).unwrap()
    }

    #[test]
    fn extract_detail_reads_string_field() {
        assert_eq!(
            extract_detail(r#"{"detail": "Sprint not found"}"#),
            Some("Sprint not found".to_string())
        );
    }

    #[test]
    fn extract_detail_stringifies_structured_field() {
        assert_eq!(
            extract_detail(r#"{"detail": [{"loc": ["title"]}]}"#),
            Some(r#"[{"loc":["title"]}]"#.to_string())
        );
    }

    #[test]
    fn extract_detail_handles_non_json_and_missing() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"error": "nope"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": null}"#), None);
    }

    #[test]
    fn unauthorized_purges_token_and_fires_handler() {
        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let probe = Probe::new();
        let client = client_with(tokens.clone(), probe.clone());

        let err = client.status_error(StatusCode::UNAUTHORIZED, r#"{"detail": "expired"}"#);

        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some("expired"));
        assert_eq!(tokens.get(), None);
        assert_eq!(probe.fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn other_statuses_leave_credentials_alone() {
        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let probe = Probe::new();
        let client = client_with(tokens.clone(), probe.clone());

        let err = client.status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");

        assert!(!err.is_unauthorized());
        assert_eq!(tokens.get(), Some("tok".to_string()));
        assert_eq!(probe.fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = ClientConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(
            &config,
            Arc::new(MemoryTokenStore::new()),
            Probe::new(),
        )
        .unwrap();
        assert_eq!(client.url("/tasks"), "http://localhost:8000/tasks");
    }
}
