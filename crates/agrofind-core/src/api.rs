use std::time::Duration;

use reqwest::{multipart, Client, Response};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{AgrofindError, Result};
use crate::model::{
    Category, HealthResponse, IngestRequest, SearchRequest, SearchResponse, SelectedFile,
    UploadResponse,
};

/// Typed client for the remote search/indexing service.
///
/// Wraps the four remote operations (health, search, upload, ingest) behind a
/// single reqwest client that carries the request timeout. JSON bodies and
/// the multipart upload set their own content types.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.client.get(self.url("/health")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let response = self
            .client
            .post(self.url("/search"))
            .json(request)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// One multipart request per attempt: the service persists the binary and
    /// triggers indexing as a single logical operation.
    pub async fn upload_pdf(
        &self,
        file: &SelectedFile,
        category: Category,
    ) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(&file.path).await?;
        let part = multipart::Part::bytes(bytes)
            .file_name(file.filename.clone())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("category", category.to_string());

        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    pub async fn ingest(&self, gcs_path: &str, category: Category) -> Result<serde_json::Value> {
        let request = IngestRequest {
            gcs_path: gcs_path.to_string(),
            category,
        };
        let response = self
            .client
            .post(self.url("/ingest"))
            .json(&request)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

/// Error body shape the service uses for non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Extract the structured `detail` field from an error body, if the body is
/// JSON and carries one.
fn parse_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
}

/// Map non-2xx responses to `AgrofindError::Api`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AgrofindError::Api {
        status: status.as_u16(),
        detail: parse_detail(&body),
    })
}
