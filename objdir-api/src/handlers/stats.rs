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

//! Metrics and health handlers for observability endpoints.
//!
//! Provides two endpoints:
//! - `GET /metrics`: Prometheus text format for external monitoring systems.
//! - `GET /health`: JSON liveness probe with uptime.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::server::AppState;

/// JSON health response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"ok"` when the server is answering.
    pub status: &'static str,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
}

/// Handler for `GET /metrics`: Prometheus text format.
///
/// Returns all metrics collected by the `metrics` crate in Prometheus exposition format.
/// Returns 503 if the Prometheus recorder is not initialized.
pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.prometheus_handle {
        Some(handle) => {
            let body = handle.render();
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                body,
            )
                .into_response()
        }
        None => (StatusCode::SERVICE_UNAVAILABLE, "Metrics disabled").into_response(),
    }
}

/// Handler for `GET /health`.
///
/// Does not contact the storage backend.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    };

    (StatusCode::OK, axum::Json(response))
}
