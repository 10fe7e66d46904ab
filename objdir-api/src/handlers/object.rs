// Copyright 2026 S4Core Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single-object handlers.
//!
//! Implements:
//! - GetFileUrl (GET /files/{key})
//! - GetUploadUrl (POST /upload-url)
//! - DeleteFile (DELETE /files/{key})

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use objdir_core::cdn::{cdn_url, invalidation_path};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ApiError, KEY_REQUIRED, UPLOAD_FIELDS_REQUIRED};
use crate::server::AppState;

/// HTTP method the client must use with an upload URL.
pub const UPLOAD_METHOD: &str = "PUT";

/// Query parameters for GetFileUrl.
#[derive(Debug, Deserialize, Default)]
pub struct FileUrlQuery {
    /// `"true"` to return a CDN URL instead of a signed storage URL.
    pub cdn: Option<String>,
}

/// Response body for GetFileUrl.
#[derive(Debug, Serialize)]
pub struct FileUrlResponse {
    /// Download URL.
    pub url: String,
    /// Object key.
    pub key: String,
}

/// Request body for GetUploadUrl.
///
/// Both fields are optional at the parsing level so that missing fields
/// are reported as a validation failure rather than a parse failure.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    /// Object key to upload to.
    #[serde(default)]
    pub key: Option<String>,
    /// MIME type of the file.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Headers the client must send with the upload.
#[derive(Debug, Serialize)]
pub struct UploadHeaders {
    /// Must match the content type the URL was signed for.
    #[serde(rename = "Content-Type")]
    pub content_type: String,
}

/// Response body for GetUploadUrl.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Presigned upload URL.
    pub upload_url: String,
    /// Object key.
    pub key: String,
    /// Always `"PUT"`.
    pub upload_method: &'static str,
    /// Headers to send with the upload.
    pub headers: UploadHeaders,
}

/// Response body for DeleteFile.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message.
    pub message: &'static str,
    /// Deleted key.
    pub key: String,
}

/// Returns a download URL for an object.
///
/// With `?cdn=true` and a configured CDN domain the URL points at the CDN;
/// otherwise it is a time-limited storage URL.
///
/// # Returns
///
/// - 200 OK with `{url, key}`
/// - 400 if the key is empty or not valid UTF-8, or the query is malformed
/// - 500 if the URL cannot be issued
pub async fn get_file_url(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<FileUrlQuery>, QueryRejection>,
) -> Result<Json<FileUrlResponse>, ApiError> {
    let Path(key) = path?;
    let Query(params) = query?;
    validate_key(&key)?;
    let use_cdn = params.cdn.as_deref() == Some("true");
    debug!("GetFileUrl: key={}, cdn={}", key, use_cdn);

    let url = match state.cdn_domain.as_deref() {
        Some(domain) if use_cdn => cdn_url(domain, &key),
        _ => {
            if use_cdn {
                debug!("No CDN domain configured, issuing a storage URL for {}", key);
            }
            state
                .storage
                .issue_download_url(&key)
                .await
                .map_err(|e| ApiError::backend("Error generating file URL", e))?
        }
    };

    Ok(Json(FileUrlResponse { url, key }))
}

/// Returns a presigned upload URL.
///
/// # Request Format
///
/// ```json
/// {"key": "docs/report.pdf", "contentType": "application/pdf"}
/// ```
///
/// # Returns
///
/// - 200 OK with `{uploadUrl, key, uploadMethod, headers}`
/// - 400 if the body is not JSON or lacks `key`/`contentType`
/// - 500 if the URL cannot be issued
pub async fn get_upload_url(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadUrlResponse>, ApiError> {
    let request = parse_upload_request(&body)?;

    let (key, content_type) = match (request.key, request.content_type) {
        (Some(key), Some(content_type)) if !key.is_empty() && !content_type.is_empty() => {
            (key, content_type)
        }
        _ => return Err(ApiError::validation(UPLOAD_FIELDS_REQUIRED)),
    };

    info!("GetUploadUrl: key={}, content_type={}", key, content_type);

    let upload_url = state
        .storage
        .issue_upload_url(&key, &content_type)
        .await
        .map_err(|e| ApiError::backend("Error generating upload URL", e))?;

    Ok(Json(UploadUrlResponse {
        upload_url,
        key,
        upload_method: UPLOAD_METHOD,
        headers: UploadHeaders { content_type },
    }))
}

/// Deletes an object and invalidates its CDN copy.
///
/// Invalidation is best-effort: its failure is logged and the delete is
/// still reported as successful.
///
/// # Returns
///
/// - 200 OK with `{message, key}`
/// - 400 if the key is empty or not valid UTF-8
/// - 500 if the delete fails
pub async fn delete_file(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(key) = path?;
    validate_key(&key)?;
    info!("DeleteFile: key={}", key);

    state
        .storage
        .delete_object(&key)
        .await
        .map_err(|e| ApiError::backend("Error deleting file", e))?;

    invalidate_deleted_key(&state, &key).await;

    info!("File deleted: {}", key);
    Ok(Json(DeleteResponse {
        message: "File deleted successfully",
        key,
    }))
}

/// Handles object routes that name no key (`DELETE /files`, `/files/`).
pub async fn key_required() -> ApiError {
    ApiError::validation(KEY_REQUIRED)
}

/// Invalidates the CDN copy of a deleted key, logging any failure.
async fn invalidate_deleted_key(state: &AppState, key: &str) {
    let Some(cache) = &state.cache else {
        warn!("CDN invalidation skipped for {}: no distribution configured", key);
        return;
    };

    match cache.invalidate(&[invalidation_path(key)]).await {
        Ok(invalidation_id) => {
            debug!("CDN invalidation {} created for {}", invalidation_id, key);
        }
        Err(e) => {
            metrics::counter!("cdn_invalidation_failures_total").increment(1);
            warn!("CDN invalidation failed for {}: {}", key, e);
        }
    }
}

fn validate_key(key: &str) -> Result<(), ApiError> {
    if key.is_empty() {
        return Err(ApiError::validation(KEY_REQUIRED));
    }
    Ok(())
}

/// Parses an upload request body. An empty body is an empty request.
fn parse_upload_request(body: &[u8]) -> Result<UploadUrlRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UploadUrlRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Invalid request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_request() {
        let request =
            parse_upload_request(br#"{"key":"a/b.png","contentType":"image/png"}"#).unwrap();
        assert_eq!(request.key.as_deref(), Some("a/b.png"));
        assert_eq!(request.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_parse_upload_request_empty_body() {
        let request = parse_upload_request(b"  ").unwrap();
        assert!(request.key.is_none());
        assert!(request.content_type.is_none());
    }

    #[test]
    fn test_parse_upload_request_invalid_json() {
        let err = parse_upload_request(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("a.txt").is_ok());
        assert!(validate_key("").is_err());
    }

    #[test]
    fn test_upload_response_wire_format() {
        let response = UploadUrlResponse {
            upload_url: "https://example.com/put".to_string(),
            key: "a.png".to_string(),
            upload_method: UPLOAD_METHOD,
            headers: UploadHeaders {
                content_type: "image/png".to_string(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["uploadUrl"], "https://example.com/put");
        assert_eq!(value["uploadMethod"], "PUT");
        assert_eq!(value["headers"]["Content-Type"], "image/png");
    }
}
