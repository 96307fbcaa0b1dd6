use std::time::Duration;

use reqwest::{multipart::Form, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::{entities::job_posting::lenient_optional_string, errors::AppError, settings::AppConfig};

/// Result envelope every mutating endpoint returns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(
        default,
        alias = "_id",
        alias = "insertedId",
        alias = "jobId",
        deserialize_with = "lenient_optional_string"
    )]
    pub id: Option<String>,
}

impl ActionResponse {
    /// A missing flag counts as failure, same as `false`.
    pub fn into_result(self, path: &str) -> Result<ActionResponse, AppError> {
        if self.success == Some(true) {
            return Ok(self);
        }
        let reason = self
            .message
            .unwrap_or_else(|| "operation was not confirmed".to_string());
        tracing::warn!(path, %reason, "backend did not confirm operation");
        Err(AppError::Network(reason))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Thin reqwest wrapper shared by every repository.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base_url = config
            .base_url()
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        Self::with_base_url(base_url, config.request_timeout())
    }

    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| AppError::InternalError(format!("Invalid URL {}: {}", joined, e)))
    }

    pub async fn get_json<R>(&self, path: &str) -> Result<R, AppError>
    where
        R: DeserializeOwned,
    {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Self::read_json(path, response).await
    }

    pub async fn send_json<T, R>(&self, method: Method, path: &str, body: &T) -> Result<R, AppError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(method, path, Some(body)).await?;
        Self::read_json(path, response).await
    }

    /// Sends a mutating request and insists on `success: true` in the reply.
    pub async fn action<T>(&self, method: Method, path: &str, body: Option<&T>) -> Result<ActionResponse, AppError>
    where
        T: Serialize + ?Sized,
    {
        let response = self.send(method, path, body).await?;
        let reply: ActionResponse = Self::read_json(path, response).await?;
        reply.into_result(path)
    }

    pub async fn post_multipart<R>(&self, path: &str, form: Form) -> Result<R, AppError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST multipart");

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::transport_error(path, e))?;

        Self::read_json(path, response).await
    }

    async fn send<T>(&self, method: Method, path: &str, body: Option<&T>) -> Result<Response, AppError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| Self::transport_error(path, e))
    }

    async fn read_json<R>(path: &str, response: Response) -> Result<R, AppError>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(path, e))?;

        if !status.is_success() {
            return Err(Self::status_error(path, status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(path, error = %e, "malformed response body");
            AppError::from(e)
        })
    }

    fn status_error(path: &str, status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        tracing::error!(path, status = status.as_u16(), %detail, "backend returned an error");

        match status {
            StatusCode::BAD_REQUEST => AppError::InvalidInput(detail),
            StatusCode::NOT_FOUND => AppError::NotFound(detail),
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(detail),
            _ => AppError::Network(format!("HTTP {}: {}", status.as_u16(), detail)),
        }
    }

    fn transport_error(path: &str, err: reqwest::Error) -> AppError {
        tracing::error!(path, error = %err, "transport failure");
        AppError::from(err)
    }
}
