use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error};

use crate::errors::{AppError, Relay};
use crate::models::{ChatRelayRequest, UploadPayload, UploadResponse};

const ASK_PATH: &str = "/ask";
const UPLOAD_PATH: &str = "/upload-documents";

/// HTTP client for the AI backend. Cloning shares the underlying
/// connection pool.
///
/// No request timeout is configured: a relayed call lasts as long as the
/// backend and the transport allow.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts a question to `/ask` and returns the response with its body
    /// still unread, so the caller can stream it.
    pub async fn ask(&self, request: &ChatRelayRequest) -> Result<reqwest::Response, AppError> {
        let url = format!("{}{ASK_PATH}", self.base_url);
        debug!("Forwarding chat request to {url}");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| AppError::BackendUnreachable {
                relay: Relay::Chat,
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AppError::BackendStatus {
                relay: Relay::Chat,
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }

    /// Sends the multipart body to `/upload-documents` unchanged and parses
    /// the backend's JSON answer.
    pub async fn upload_documents(&self, payload: UploadPayload) -> Result<UploadResponse, AppError> {
        let url = format!("{}{UPLOAD_PATH}", self.base_url);
        debug!("Forwarding {} upload bytes to {url}", payload.body.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, payload.content_type)
            .body(payload.body)
            .send()
            .await
            .map_err(|source| AppError::BackendUnreachable {
                relay: Relay::Upload,
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Upload rejected by backend ({status}): {detail}");
            return Err(AppError::BackendStatus { relay: Relay::Upload, status: status.as_u16() });
        }

        let body = response
            .json()
            .await
            .map_err(|source| AppError::MalformedBackendResponse { relay: Relay::Upload, source })?;
        Ok(UploadResponse(body))
    }
}
