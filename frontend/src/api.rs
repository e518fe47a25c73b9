use gloo_net::http::{Request, Response};
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ReadableStreamDefaultReader};

use crate::models::{ChatRequest, ErrorBody, UploadResponse};
use crate::stream::ChunkSource;

/// Relay endpoints, served from the same origin as the app.
const CHAT_URL: &str = "/api/chat";
const UPLOAD_URL: &str = "/api/upload";

/// Multipart field name the backend expects, repeated once per file.
const FILES_FIELD: &str = "files";

/// Uploads the given files as one multipart form.
pub async fn upload_files(files: &[File]) -> Result<UploadResponse, String> {
    let form = FormData::new().map_err(|e| format!("Form error: {e:?}"))?;
    for file in files {
        form.append_with_blob_and_filename(FILES_FIELD, file, &file.name())
            .map_err(|e| format!("Form error: {e:?}"))?;
    }

    let resp = Request::post(UPLOAD_URL)
        .body(form)
        .map_err(|e| format!("Request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }

    resp.json::<UploadResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Sends a chat question and returns a reader over the streamed answer.
pub async fn open_chat_stream(request: &ChatRequest) -> Result<ChatStream, String> {
    let resp = Request::post(CHAT_URL)
        .json(request)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }

    let body = resp.body().ok_or_else(|| "Empty response body".to_string())?;
    let reader = body.get_reader().unchecked_into::<ReadableStreamDefaultReader>();
    Ok(ChatStream { reader })
}

/// Sequential reader over a streamed response body.
pub struct ChatStream {
    reader: ReadableStreamDefaultReader,
}

impl ChunkSource for ChatStream {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, String> {
        let result = JsFuture::from(self.reader.read())
            .await
            .map_err(|e| format!("Stream error: {e:?}"))?;

        let done = Reflect::get(&result, &JsValue::from_str("done"))
            .map_err(|e| format!("Stream error: {e:?}"))?
            .as_bool()
            .unwrap_or(true);
        if done {
            return Ok(None);
        }

        let value = Reflect::get(&result, &JsValue::from_str("value"))
            .map_err(|e| format!("Stream error: {e:?}"))?;
        Ok(Some(Uint8Array::new(&value).to_vec()))
    }
}

async fn server_error(resp: Response) -> String {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) => format!("Server error {status}: {}", body.error),
        Err(_) => format!("Server error: {status}"),
    }
}
