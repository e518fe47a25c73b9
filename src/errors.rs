use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorBody;

/// Which relay endpoint an error belongs to. Decides the fixed message the
/// browser sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relay {
    Chat,
    Upload,
}

impl Relay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relay::Chat => "chat",
            Relay::Upload => "upload",
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            Relay::Chat => "Internal Server Error",
            Relay::Upload => "Failed to upload files",
        }
    }
}

impl std::fmt::Display for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relay error. Every variant collapses into a flat `{"error": ...}` body;
/// the detail only reaches the logs.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Client errors ────────────────────────────────────────────────────────
    #[error("Malformed {relay} request: {message}")]
    MalformedRequest { relay: Relay, message: String },

    #[error("Chat request has no session identifier")]
    MissingSession,

    #[error("Upload body exceeds the configured size limit")]
    UploadTooLarge,

    // ── Backend errors ───────────────────────────────────────────────────────
    #[error("Backend unreachable at {url}")]
    BackendUnreachable {
        relay: Relay,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend answered {relay} request with status {status}")]
    BackendStatus { relay: Relay, status: u16 },

    #[error("Backend returned a malformed {relay} response")]
    MalformedBackendResponse {
        relay: Relay,
        #[source]
        source: reqwest::Error,
    },
}

impl AppError {
    pub fn malformed(relay: Relay, message: impl Into<String>) -> Self {
        AppError::MalformedRequest { relay, message: message.into() }
    }

    pub fn relay(&self) -> Relay {
        match self {
            AppError::MalformedRequest { relay, .. }
            | AppError::BackendUnreachable { relay, .. }
            | AppError::BackendStatus { relay, .. }
            | AppError::MalformedBackendResponse { relay, .. } => *relay,
            AppError::MissingSession => Relay::Chat,
            AppError::UploadTooLarge => Relay::Upload,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::MalformedRequest { .. } | AppError::MissingSession | AppError::UploadTooLarge
        )
    }

    pub fn status(&self) -> StatusCode {
        if matches!(self, AppError::UploadTooLarge) {
            StatusCode::PAYLOAD_TOO_LARGE
        } else if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            warn!("Rejected {} request: {self}", self.relay());
        } else {
            match std::error::Error::source(&self) {
                Some(source) => error!("{self}: {source}"),
                None => error!("{self}"),
            }
        }

        let body = ErrorBody { error: self.relay().public_message().to_string() };
        (self.status(), Json(body)).into_response()
    }
}
