use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use spaces_core::{AppError, AppResult};
use tracing::debug;
use url::Url;

/// Header every state-changing Kibana request must carry.
const XSRF_HEADER: &str = "kbn-xsrf";

/// Header unlocking internal Kibana routes.
const INTERNAL_ORIGIN_HEADER: &str = "x-elastic-internal-origin";

/// Connection settings for the Kibana HTTP APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KibanaClientConfig {
    /// Kibana origin including any server base path.
    pub base_url: Url,
    /// Basic auth user name.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl KibanaClientConfig {
    /// Creates settings without credentials and a 15 second timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            username: None,
            password: None,
            timeout: Duration::from_secs(15),
        }
    }

    /// Builds the shared client for these settings.
    pub fn connect(&self) -> AppResult<KibanaHttpClient> {
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(KibanaHttpClient {
            http_client,
            base_url: self.base_url.as_str().trim_end_matches('/').to_owned(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

/// Thin reqwest wrapper shared by the Kibana adapters.
#[derive(Clone)]
pub struct KibanaHttpClient {
    http_client: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl KibanaHttpClient {
    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http_client.get(self.url(path)))
    }

    pub(crate) fn get_internal(&self, path: &str) -> RequestBuilder {
        self.get(path).header(INTERNAL_ORIGIN_HEADER, "Kibana")
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http_client.put(self.url(path))).header(XSRF_HEADER, "true")
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> AppResult<T> {
        let response = self.send(request, operation).await?;
        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!("failed to decode {operation} response: {error}"))
        })
    }

    pub(crate) async fn send_empty(&self, request: RequestBuilder, operation: &str) -> AppResult<()> {
        self.send(request, operation).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> AppResult<reqwest::Response> {
        let response = request.send().await.map_err(|error| {
            AppError::Internal(format!("{operation} transport error: {error}"))
        })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "kibana response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(status_error(status, operation, &body))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(username) => request.basic_auth(username, self.password.as_deref()),
            None => request,
        }
    }
}

pub(crate) fn status_error(status: StatusCode, operation: &str, body: &str) -> AppError {
    let message = format!("{operation} failed with status {status}: {body}");
    match status {
        StatusCode::BAD_REQUEST => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(message),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use spaces_core::AppError;
    use url::Url;

    use super::{KibanaClientConfig, status_error};

    #[test]
    fn statuses_map_to_error_categories() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "get roles", ""),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "save role", ""),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "save role", "upstream"),
            AppError::Internal(message) if message.contains("upstream")
        ));
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let base_url = Url::parse("http://localhost:5601/kbn/").unwrap_or_else(|_| unreachable!());
        let client = KibanaClientConfig::new(base_url)
            .connect()
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            client.url("/api/features"),
            "http://localhost:5601/kbn/api/features"
        );
    }
}
