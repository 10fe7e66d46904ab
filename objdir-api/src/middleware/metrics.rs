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

//! Metrics middleware for recording HTTP request metrics.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Middleware that records HTTP request count and latency metrics.
///
/// Records two metrics via the `metrics` crate:
/// - `http_requests_total` (counter): incremented per request, labeled by method, status and path.
/// - `http_request_duration_seconds` (histogram): request latency, labeled by method and path.
///
/// Object keys are replaced with a placeholder to keep label cardinality bounded.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    metrics::counter!("http_requests_total", "method" => method.clone(), "status" => status, "path" => path)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(duration);

    response
}

/// Normalizes request paths to avoid label cardinality explosion.
///
/// - `/files` → `/files`
/// - `/files/{key...}` → `/files/{key}`
/// - `/upload-url`, `/metrics`, `/health` → kept as-is
/// - anything else → `other`
fn normalize_path(path: &str) -> &'static str {
    match path {
        "/files" => "/files",
        "/upload-url" => "/upload-url",
        "/metrics" => "/metrics",
        "/health" => "/health",
        p if p.starts_with("/files/") => "/files/{key}",
        _ => "other",
    }
}
