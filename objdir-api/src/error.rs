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

//! API error types and responses.
//!
//! Every failure is rendered as a JSON envelope:
//!
//! ```json
//! {"message": "Error deleting file", "error": "Storage error during DeleteObject: ..."}
//! ```
//!
//! Validation failures carry only `message`.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use objdir_core::BackendError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Message returned when a request names no object key.
pub const KEY_REQUIRED: &str = "File key is required";

/// Message returned when an upload request lacks a key or content type.
pub const UPLOAD_FIELDS_REQUIRED: &str = "File key and contentType are required";

/// Errors surfaced by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request is missing a required field or is malformed.
    #[error("{0}")]
    Validation(String),

    /// The storage or cache backend failed.
    #[error("{context}: {source}")]
    Backend {
        /// What the handler was doing (e.g. "Error listing files").
        context: &'static str,
        /// Underlying backend failure.
        #[source]
        source: BackendError,
    },
}

/// JSON body of a failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable description of the failed operation.
    pub message: String,
    /// Stringified backend error, for backend failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a backend error and logs it.
    pub fn backend(context: &'static str, source: BackendError) -> Self {
        error!("{}: {}", context, source);
        Self::Backend { context, source }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the JSON body for this error.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(message) => ErrorBody {
                message: message.clone(),
                error: None,
            },
            ApiError::Backend { context, source } => ErrorBody {
                message: (*context).to_string(),
                error: Some(source.to_string()),
            },
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        (
            self.status_code(),
            [("x-request-id", request_id)],
            Json(self.body()),
        )
            .into_response()
    }
}
