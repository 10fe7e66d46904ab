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

//! Application initialization and runtime.
//!
//! This module handles:
//! - AWS client and backend initialization
//! - HTTP server setup and routing
//! - TLS/HTTPS configuration
//! - Graceful shutdown

use crate::cloudfront::CloudFrontInvalidator;
use crate::config::{Config, TlsConfig};
use crate::s3::S3Gateway;
use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use axum_server::tls_rustls::RustlsConfig;
use objdir_api::{create_router, AppState};
use objdir_core::{CacheInvalidator, StorageGateway};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Main application.
pub struct App {
    config: Config,
    storage: Arc<dyn StorageGateway>,
    cache: Option<Arc<dyn CacheInvalidator>>,
}

impl App {
    /// Creates a new application instance.
    ///
    /// Loads AWS credentials and region from the environment and creates the
    /// S3 gateway and, when a distribution is configured, the CloudFront
    /// invalidator.
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing objdir application...");

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.storage.region.clone()))
            .load()
            .await;

        let storage: Arc<dyn StorageGateway> = Arc::new(S3Gateway::new(
            aws_sdk_s3::Client::new(&sdk_config),
            config.storage.bucket.clone(),
            config.storage.url_expiration(),
        ));

        let cache: Option<Arc<dyn CacheInvalidator>> = match &config.cdn.distribution_id {
            Some(distribution_id) => {
                info!("CDN invalidation enabled for distribution {}", distribution_id);
                Some(Arc::new(CloudFrontInvalidator::new(
                    aws_sdk_cloudfront::Client::new(&sdk_config),
                    distribution_id.clone(),
                )))
            }
            None => {
                warn!("CLOUDFRONT_DISTRIBUTION_ID not set, CDN invalidation disabled");
                None
            }
        };

        info!(
            "Using bucket {} in {}",
            config.storage.bucket, config.storage.region
        );

        Ok(Self::with_backends(config, storage, cache))
    }

    /// Creates an application over existing backends.
    pub fn with_backends(
        config: Config,
        storage: Arc<dyn StorageGateway>,
        cache: Option<Arc<dyn CacheInvalidator>>,
    ) -> Self {
        Self {
            config,
            storage,
            cache,
        }
    }

    /// Builds the handler state from the configuration.
    pub fn state(&self) -> AppState {
        let mut state = AppState::new(self.storage.clone())
            .with_url_concurrency(self.config.listing.url_concurrency)
            .with_prefix_mode(self.config.listing.prefix_mode())
            .with_cors_policy(self.config.cors.policy());
        if let Some(cache) = &self.cache {
            state = state.with_cache_invalidator(cache.clone());
        }
        if let Some(domain) = &self.config.cdn.domain {
            state = state.with_cdn_domain(domain.clone());
        }
        state
    }

    /// Runs the application (HTTP/HTTPS server).
    ///
    /// If TLS is configured via `OBJDIR_TLS_CERT` and `OBJDIR_TLS_KEY` environment
    /// variables, the server will use HTTPS. Otherwise, it runs as HTTP.
    pub async fn run(self) -> Result<()> {
        // Validate TLS configuration early
        self.config
            .server
            .tls
            .validate()
            .map_err(|e| anyhow::anyhow!("TLS configuration error: {}", e))?;

        info!(
            "URL expiration: {}s, URL concurrency: {}, strict prefix: {}",
            self.config.storage.url_expiration_secs,
            self.config.listing.url_concurrency,
            self.config.listing.strict_prefix
        );

        // Parse bind address
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address {:?}", self.config.server.bind))?;

        // Check if TLS is enabled and load configuration
        let tls_config = if self.config.server.tls.enabled {
            Some(load_tls_config(&self.config.server.tls).await?)
        } else {
            None
        };

        // Initialize Prometheus metrics recorder if enabled
        let mut state = self.state();
        if self.config.metrics.prometheus_enabled {
            use metrics_exporter_prometheus::PrometheusBuilder;
            match PrometheusBuilder::new().install_recorder() {
                Ok(handle) => {
                    info!("Prometheus metrics enabled (available at /metrics)");
                    state = state.with_prometheus_handle(handle);
                }
                Err(e) => {
                    warn!("Failed to install Prometheus recorder: {}. Metrics disabled.", e);
                }
            }
        } else {
            info!("Prometheus metrics disabled");
        }

        let router = create_router(state);

        // Run server with or without TLS
        if let Some(rustls_config) = tls_config {
            info!("Listening on https://{}", addr);
            run_https_server(addr, router, rustls_config).await
        } else {
            info!("Listening on http://{}", addr);
            run_http_server(addr, router).await
        }
    }
}

/// Loads TLS configuration from certificate and key files.
pub async fn load_tls_config(tls_config: &TlsConfig) -> Result<RustlsConfig> {
    let cert_path = tls_config
        .cert_path
        .as_ref()
        .context("TLS certificate path not configured")?;
    let key_path = tls_config
        .key_path
        .as_ref()
        .context("TLS private key path not configured")?;

    info!("Loading TLS certificate from {:?}", cert_path);
    info!("Loading TLS private key from {:?}", key_path);

    let rustls_config = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .context("Failed to load TLS certificate and key")?;

    info!("TLS configured successfully");
    Ok(rustls_config)
}

/// Runs the HTTP server (without TLS).
async fn run_http_server(addr: SocketAddr, router: axum::Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Runs the HTTPS server (with TLS).
async fn run_https_server(
    addr: SocketAddr,
    router: axum::Router,
    rustls_config: RustlsConfig,
) -> Result<()> {
    // Create handle for graceful shutdown
    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(30)));
    });

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handles graceful shutdown signals.
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown...");
        }
    }
}
