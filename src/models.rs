use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat`, forwarded as-is to the backend's `/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRelayRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: String,
}

/// Multipart payload of `POST /api/upload`, kept byte-for-byte.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Full `Content-Type` header value, boundary included.
    pub content_type: String,
    pub body: axum::body::Bytes,
}

/// Backend answer to an upload. Passed through untouched; only the
/// session identifier is inspected for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResponse(pub Value);

impl UploadResponse {
    pub fn session_id(&self) -> Option<&str> {
        self.0.get("session_id").and_then(Value::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_id_is_optional_on_the_wire() {
        let req: ChatRelayRequest = serde_json::from_str(r#"{"message":"hej"}"#).unwrap();
        assert_eq!(req.message, "hej");
        assert!(req.session_id.is_empty());
    }

    #[test]
    fn upload_response_exposes_session_id() {
        let resp = UploadResponse(json!({ "session_id": "abc", "files": 2 }));
        assert_eq!(resp.session_id(), Some("abc"));

        let resp = UploadResponse(json!({ "status": "ok" }));
        assert_eq!(resp.session_id(), None);
    }
}
