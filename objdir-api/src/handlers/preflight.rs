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

//! CORS preflight and fallback handlers.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::server::AppState;

/// Answers a CORS preflight (`OPTIONS`) request.
///
/// The allowed origin and credentials headers are added by the CORS
/// middleware like on any other response.
pub async fn preflight(State(state): State<AppState>) -> Response {
    let mut response = (StatusCode::OK, Json(json!({ "message": "CORS enabled" }))).into_response();
    state.cors.apply_preflight(response.headers_mut());
    response
}

/// Handles requests that match no route.
pub async fn not_found(uri: Uri) -> Response {
    debug!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("No route for {}", uri.path()) })),
    )
        .into_response()
}
