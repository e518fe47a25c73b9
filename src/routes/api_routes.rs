use axum::body::{Body, Bytes};
use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::TryStreamExt;
use serde_json::Value;
use tracing::warn;

use crate::errors::{AppError, Relay};
use crate::models::{ChatRelayRequest, UploadPayload};
use crate::service::relay_service::RelayService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/chat`: pipes the backend's answer back as it arrives
pub async fn chat_handler(
    State(svc): State<RelayService>,
    payload: Result<Json<ChatRelayRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::malformed(Relay::Chat, e.body_text()))?;

    let upstream = svc.chat(request).await?;
    let stream = upstream
        .bytes_stream()
        .inspect_err(|e| warn!("Backend answer stream broke off: {e}"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// POST `/api/upload`: forwards the multipart form, returns the backend JSON
pub async fn upload_handler(
    State(svc): State<RelayService>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge
        } else {
            AppError::malformed(Relay::Upload, rejection.body_text())
        }
    })?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let response = svc.upload(UploadPayload { content_type, body }).await?;
    Ok(Json(response.0))
}
