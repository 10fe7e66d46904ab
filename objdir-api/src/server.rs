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

//! Axum HTTP server setup and routing.
//!
//! This module provides the shared application state and the router for
//! the bucket browsing API.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use objdir_core::{CacheInvalidator, PrefixMode, StorageGateway};
use tower_http::trace::TraceLayer;

use crate::cors::CorsPolicy;
use crate::handlers;
use crate::middleware::{cors_middleware, logging_middleware, metrics_middleware};

/// Default number of download URLs issued concurrently for one listing.
pub const DEFAULT_URL_CONCURRENCY: usize = 8;

/// Shared application state for all handlers.
///
/// Collaborators are created once at startup and shared read-only; cloning
/// the state only clones `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Object store gateway.
    pub storage: Arc<dyn StorageGateway>,
    /// CDN cache invalidator. `None` disables invalidation on delete.
    pub cache: Option<Arc<dyn CacheInvalidator>>,
    /// Public CDN domain used for `?cdn=true` download URLs.
    pub cdn_domain: Option<String>,
    /// Maximum download URLs in flight while building one listing.
    pub url_concurrency: usize,
    /// Handling of listed keys that fall outside the requested prefix.
    pub prefix_mode: PrefixMode,
    /// CORS policy applied to every response.
    pub cors: CorsPolicy,
    /// Prometheus metrics handle for rendering `/metrics` endpoint.
    pub prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Creates a new application state with default settings.
    pub fn new(storage: Arc<dyn StorageGateway>) -> Self {
        Self {
            storage,
            cache: None,
            cdn_domain: None,
            url_concurrency: DEFAULT_URL_CONCURRENCY,
            prefix_mode: PrefixMode::default(),
            cors: CorsPolicy::default(),
            prometheus_handle: None,
            start_time: Instant::now(),
        }
    }

    /// Sets the CDN cache invalidator used after deletes.
    pub fn with_cache_invalidator(mut self, cache: Arc<dyn CacheInvalidator>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the public CDN domain.
    pub fn with_cdn_domain(mut self, domain: impl Into<String>) -> Self {
        self.cdn_domain = Some(domain.into());
        self
    }

    /// Sets the download URL concurrency limit (at least 1).
    pub fn with_url_concurrency(mut self, limit: usize) -> Self {
        self.url_concurrency = limit.max(1);
        self
    }

    /// Sets how out-of-prefix keys are handled when listing.
    pub fn with_prefix_mode(mut self, mode: PrefixMode) -> Self {
        self.prefix_mode = mode;
        self
    }

    /// Sets the CORS policy.
    pub fn with_cors_policy(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Sets the Prometheus handle for rendering metrics.
    pub fn with_prometheus_handle(
        mut self,
        handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        self.prometheus_handle = Some(handle);
        self
    }
}

/// Creates the main router.
///
/// # Routing
///
/// - `GET /files?prefix=P&generateUrls=true` - List a prefix as files and folders
/// - `GET /files/{key}?cdn=true` - Download URL for an object
/// - `DELETE /files/{key}` - Delete an object and invalidate its CDN copy
/// - `GET|DELETE /files/`, `DELETE /files` - 400, no key
/// - `POST /upload-url` - Upload URL for `{key, contentType}`
/// - `GET /metrics` - Prometheus metrics
/// - `GET /health` - Liveness and uptime
/// - `OPTIONS` on each of the above - CORS preflight
pub fn create_router(state: AppState) -> Router {
    let files_router = Router::new()
        .route(
            "/files",
            get(handlers::list_files)
                .delete(handlers::key_required)
                .options(handlers::preflight),
        )
        // The catch-all below does not match an empty key
        .route(
            "/files/",
            get(handlers::key_required)
                .delete(handlers::key_required)
                .options(handlers::preflight),
        )
        // Keys contain slashes, so the object routes use a catch-all
        .route(
            "/files/*key",
            get(handlers::get_file_url)
                .delete(handlers::delete_file)
                .options(handlers::preflight),
        )
        .route(
            "/upload-url",
            post(handlers::get_upload_url).options(handlers::preflight),
        );

    Router::new()
        .route(
            "/metrics",
            get(handlers::stats::prometheus_metrics).options(handlers::preflight),
        )
        .route(
            "/health",
            get(handlers::stats::health).options(handlers::preflight),
        )
        .merge(files_router)
        .fallback(handlers::not_found)
        // CORS headers on every response, including errors and fallbacks
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cors_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(metrics_middleware))
        .with_state(state)
}
