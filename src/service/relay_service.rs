use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::backend::BackendClient;
use crate::errors::{AppError, Relay};
use crate::models::{ChatRelayRequest, UploadPayload, UploadResponse};

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

#[derive(Clone)]
pub struct RelayService {
    backend: BackendClient,
}

impl RelayService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Opens the backend answer stream for one chat question.
    ///
    /// The message text is not validated here; empty input is the client's
    /// concern and the backend decides what to do with it.
    pub async fn chat(&self, request: ChatRelayRequest) -> Result<reqwest::Response, AppError> {
        if request.session_id.trim().is_empty() {
            return Err(AppError::MissingSession);
        }

        let span = info_span!("relay", relay = %Relay::Chat, request_id = %Uuid::new_v4());
        async {
            info!(
                session_id = %request.session_id,
                message_len = request.message.len(),
                "Relaying chat question"
            );
            let response = self.backend.ask(&request).await?;
            info!(status = response.status().as_u16(), "Streaming backend answer");
            Ok::<_, AppError>(response)
        }
        .instrument(span)
        .await
    }

    pub async fn upload(&self, payload: UploadPayload) -> Result<UploadResponse, AppError> {
        let is_multipart = payload
            .content_type
            .split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(MULTIPART_FORM_DATA));
        if !is_multipart {
            return Err(AppError::malformed(
                Relay::Upload,
                format!("expected {MULTIPART_FORM_DATA}, got '{}'", payload.content_type),
            ));
        }

        let span = info_span!("relay", relay = %Relay::Upload, request_id = %Uuid::new_v4());
        async {
            info!(bytes = payload.body.len(), "Relaying document upload");
            let response = self.backend.upload_documents(payload).await?;
            match response.session_id() {
                Some(session_id) => info!(%session_id, "Documents ingested"),
                None => info!("Documents ingested; backend returned no session_id"),
            }
            Ok::<_, AppError>(response)
        }
        .instrument(span)
        .await
    }
}
