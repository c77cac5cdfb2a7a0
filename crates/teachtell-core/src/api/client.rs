use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::trim_trailing_slashes;
use crate::error::{ClientError, ClientResult};

/// Make a request path absolute.
///
/// Full `http://` / `https://` URLs pass through untouched; anything else gets
/// a leading slash and repeated slashes collapsed.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if is_absolute_url(path) {
        return path.to_string();
    }

    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Status and parsed body of a backend response.
///
/// `data` is `None` when the body is empty or not valid JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub data: Option<Value>,
}

impl ApiResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The backend's error text: first of `detail`, `error`, `message`.
    pub fn error_detail(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        ["detail", "error", "message"].iter().find_map(|key| {
            match data.get(*key)? {
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                Value::Null | Value::Bool(false) => None,
                other => Some(other.to_string()),
            }
        })
    }

    /// Error text with fallbacks: backend detail, then the HTTP reason phrase,
    /// then `default`.
    pub fn error_message(&self, default: &str) -> String {
        self.error_detail()
            .or_else(|| self.status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    /// Deserialize the body. A missing body deserializes from `null`.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let value = self.data.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    /// Turn a non-success response into [`ClientError::Api`].
    pub fn error_for_status(self, default: &str) -> ClientResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                status: self.status.as_u16(),
                detail: self.error_message(default),
            })
        }
    }
}

/// HTTP client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = trim_trailing_slashes(base_url);
        if base_url.is_empty() {
            return Err(ClientError::Config(
                "API base URL is not configured".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("teachtell/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path`.
    pub fn url_for(&self, path: &str) -> String {
        let path = normalize_path(path);
        if is_absolute_url(&path) {
            path
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// URL of a backend-hosted image, or `None` for an empty name.
    pub fn image_url(&self, image_file: &str) -> Option<String> {
        if image_file.is_empty() {
            return None;
        }
        Some(self.url_for(&format!("{}/{}", super::endpoints::IMAGES, image_file)))
    }

    /// Send a request and parse the response body leniently.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> ClientResult<ApiResponse> {
        let url = self.url_for(path);
        let mut builder = self.http.request(method.clone(), &url);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)?;
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        tracing::debug!(%method, %url, "Sending request");
        let response = builder.send().await?;
        let status = response.status();

        let data = match response.text().await {
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Failed to parse JSON response");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(%url, error = %e, "Failed to read response body");
                None
            }
        };

        tracing::debug!(%url, status = status.as_u16(), "Received response");
        Ok(ApiResponse { status, data })
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> ClientResult<ApiResponse> {
        self.request::<Value>(Method::GET, path, token, None).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        self.request(Method::POST, path, token, Some(payload)).await
    }

    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        self.request(Method::PUT, path, token, Some(payload)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> ClientResult<ApiResponse> {
        self.request::<Value>(Method::DELETE, path, token, None).await
    }
}
