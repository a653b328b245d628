//! Thin wrapper around `reqwest` with base-URL resolution and JSON helpers.

use crate::FetchError;
use serde::de::DeserializeOwned;

/// HTTP client for outbound requests.
///
/// Cloning is cheap; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Wrap a preconfigured `reqwest` client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Resolve `url` against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !is_absolute(url) => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url.to_string(),
        }
    }

    /// GET `url` and decode a JSON body. Non-2xx statuses are errors.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let url = self.resolve(url);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// POST url-encoded `fields` to `url` and return the response status.
    ///
    /// The status is not interpreted; callers decide what counts as success.
    pub async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<u16, FetchError> {
        let url = self.resolve(url);
        tracing::debug!(%url, fields = fields.len(), "POST form");

        let response = self.client.post(&url).form(fields).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Check if `source` is an http(s) URL rather than a local path.
pub fn is_absolute(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, test_client};

    #[test]
    fn test_resolve_against_base() {
        let client = FetchClient::new().with_base_url("https://provinces.open-api.vn/api/v2/");
        assert_eq!(client.resolve("/p/"), "https://provinces.open-api.vn/api/v2/p/");
        assert_eq!(client.resolve("p/1?depth=2"), "https://provinces.open-api.vn/api/v2/p/1?depth=2");
        assert_eq!(client.resolve("https://example.com/x"), "https://example.com/x");
        assert_eq!(FetchClient::new().resolve("/data.json"), "/data.json");
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let (url, server) = serve_once("200 OK", r#"{"code":1,"name":"Hà Nội"}"#).await;
        let value: serde_json::Value = test_client().get_json(&url).await.unwrap();
        assert_eq!(value["name"], "Hà Nội");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET / HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_get_json_rejects_error_status() {
        let (url, _server) = serve_once("404 Not Found", "{}").await;
        let err = test_client().get_json::<serde_json::Value>(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_post_form_reports_status() {
        let (url, server) = serve_once("500 Internal Server Error", "").await;
        let status = test_client()
            .post_form(&url, &[("entry.1", "Trà sen x2")])
            .await
            .unwrap();
        assert_eq!(status, 500);

        let request = server.await.unwrap();
        assert!(request.contains("application/x-www-form-urlencoded"));
        assert!(request.contains("entry.1=Tr%C3%A0+sen+x2"));
    }
}
