mod batch;

pub use batch::{Batch, BatchMethod, BatchOperation, BatchState, BatchStatus};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure reported by the list API. The message is exactly what the client
/// reported, with no extra context.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ApiError(String);

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let problem = serde_json::from_slice::<ProblemDocument>(body).unwrap_or_default();
        problem
            .detail
            .filter(|d| !d.trim().is_empty())
            .or_else(|| problem.title.filter(|t| !t.trim().is_empty()))
            .map(Self)
            .unwrap_or_else(|| Self(status.to_string()))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self(e.to_string())
    }
}

#[derive(Default, Deserialize)]
struct ProblemDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Requests the list repository needs from the remote API. Paths are relative
/// to the API root, e.g. `lists/{list_id}/members`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;

    async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + Sync + ?Sized;

    async fn patch<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + Sync + ?Sized;

    async fn delete(&self, path: &str) -> Result<Value, ApiError>;

    fn new_batch(&self) -> Batch {
        Batch::default()
    }

    /// Submits the batch for asynchronous execution and returns the status
    /// record the API assigned to it.
    async fn execute_batch(&self, batch: Batch) -> Result<BatchStatus, ApiError>;

    async fn batch_status(&self, batch_id: &str) -> Result<BatchStatus, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: Secret<String>,
}

impl HttpApiClient {
    pub fn new(
        base_url: Url,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: with_trailing_slash(base_url),
            api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::new(e.to_string()))?;
        Ok(self
            .http_client
            .request(method, url)
            .basic_auth("apikey", Some(self.api_key.expose_secret())))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error.message = %e, "Failed to reach the list API");
            ApiError::from(e)
        })?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let e = ApiError::from_response(status, &body);
            tracing::warn!(
                http.status_code = status.as_u16(),
                error.message = %e,
                "The list API rejected the request"
            );
            return Err(e);
        }
        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(request).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await
    }

    async fn patch<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.send(request).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send(request).await
    }

    #[tracing::instrument(name = "Submitting a batch", skip_all, fields(operations = batch.len()))]
    async fn execute_batch(&self, batch: Batch) -> Result<BatchStatus, ApiError> {
        let record = self.post("batches", &batch).await?;
        Ok(serde_json::from_value(record)?)
    }

    async fn batch_status(&self, batch_id: &str) -> Result<BatchStatus, ApiError> {
        let record = self.get(&format!("batches/{}", batch_id), &[]).await?;
        Ok(serde_json::from_value(record)?)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
