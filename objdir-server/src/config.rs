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

//! Configuration management for the objdir server.
//!
//! Every setting comes from an environment variable with a default; see
//! the `Default` impls below. [`Config::load`] validates the result.

use anyhow::{bail, Context};
use objdir_api::{CorsPolicy, DEFAULT_URL_CONCURRENCY};
use objdir_core::PrefixMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default download/upload URL lifetime in seconds.
pub const DEFAULT_URL_EXPIRATION_SECS: u64 = 3600;

/// Longest URL lifetime the storage service accepts (7 days).
pub const MAX_URL_EXPIRATION_SECS: u64 = 604_800;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings (bind address, TLS)
    pub server: ServerConfig,
    /// Bucket and URL signing settings
    pub storage: StorageConfig,
    /// CDN distribution settings
    pub cdn: CdnConfig,
    /// Listing behavior
    pub listing: ListingConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// Metrics and monitoring configuration
    pub metrics: MetricsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    /// Can be set via OBJDIR_BIND environment variable.
    pub bind: String,
    /// TLS configuration for HTTPS support.
    pub tls: TlsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: std::env::var("OBJDIR_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            tls: TlsConfig::default(),
        }
    }
}

/// TLS/HTTPS configuration.
///
/// TLS is disabled by default. To enable TLS, set the `OBJDIR_TLS_CERT` and
/// `OBJDIR_TLS_KEY` environment variables to point to PEM-encoded certificate
/// and private key files.
///
/// Example:
/// ```bash
/// export OBJDIR_TLS_CERT=/path/to/cert.pem
/// export OBJDIR_TLS_KEY=/path/to/key.pem
/// ./objdir-server
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Whether TLS is enabled.
    /// Automatically set to true when both cert_path and key_path are provided.
    pub enabled: bool,
    /// Path to PEM-encoded certificate file.
    pub cert_path: Option<PathBuf>,
    /// Path to PEM-encoded private key file.
    pub key_path: Option<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        let cert_path = std::env::var("OBJDIR_TLS_CERT").ok().map(PathBuf::from);
        let key_path = std::env::var("OBJDIR_TLS_KEY").ok().map(PathBuf::from);

        // Enable TLS only if both cert and key are provided
        let enabled = cert_path.is_some() && key_path.is_some();

        Self {
            enabled,
            cert_path,
            key_path,
        }
    }
}

impl TlsConfig {
    /// Validates TLS configuration.
    ///
    /// Returns an error if TLS is enabled but certificate or key paths are missing.
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.cert_path.is_none() {
                return Err("TLS enabled but OBJDIR_TLS_CERT is not set".to_string());
            }
            if self.key_path.is_none() {
                return Err("TLS enabled but OBJDIR_TLS_KEY is not set".to_string());
            }
        }
        Ok(())
    }
}

/// Bucket configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name. Required; set via S3_BUCKET_NAME.
    pub bucket: String,
    /// Region of the bucket. Set via AWS_REGION.
    pub region: String,
    /// Lifetime of issued URLs in seconds. Set via URL_EXPIRATION_TIME.
    pub url_expiration_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: std::env::var("S3_BUCKET_NAME").unwrap_or_default(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            url_expiration_secs: env_parse("URL_EXPIRATION_TIME", DEFAULT_URL_EXPIRATION_SECS),
        }
    }
}

impl StorageConfig {
    /// Lifetime of issued URLs.
    pub fn url_expiration(&self) -> Duration {
        Duration::from_secs(self.url_expiration_secs)
    }
}

/// CDN configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Distribution to invalidate after deletes.
    /// Unset disables invalidation. Set via CLOUDFRONT_DISTRIBUTION_ID.
    pub distribution_id: Option<String>,
    /// Public domain for `?cdn=true` URLs. Set via CLOUDFRONT_DOMAIN.
    pub domain: Option<String>,
}

impl CdnConfig {
    /// Reads the CDN settings from the environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            distribution_id: env_non_empty("CLOUDFRONT_DISTRIBUTION_ID"),
            domain: env_non_empty("CLOUDFRONT_DOMAIN"),
        }
    }
}

/// Listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Download URLs issued concurrently per listing.
    /// Set via OBJDIR_URL_CONCURRENCY.
    pub url_concurrency: usize,
    /// Skip listed keys outside the requested prefix.
    /// Disabled by setting OBJDIR_LENIENT_PREFIX to true.
    pub strict_prefix: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url_concurrency: env_parse("OBJDIR_URL_CONCURRENCY", DEFAULT_URL_CONCURRENCY),
            strict_prefix: !env_flag("OBJDIR_LENIENT_PREFIX", false),
        }
    }
}

impl ListingConfig {
    /// Prefix handling for the listing builder.
    pub fn prefix_mode(&self) -> PrefixMode {
        if self.strict_prefix {
            PrefixMode::Strict
        } else {
            PrefixMode::Lenient
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Set via OBJDIR_CORS_ORIGIN as a comma-separated list.
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime. Set via OBJDIR_CORS_MAX_AGE.
    pub max_age_seconds: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let defaults = CorsPolicy::default();
        Self {
            allowed_origins: std::env::var("OBJDIR_CORS_ORIGIN")
                .map(|s| parse_origins(&s))
                .unwrap_or(defaults.allowed_origins),
            max_age_seconds: env_parse("OBJDIR_CORS_MAX_AGE", defaults.max_age_seconds),
        }
    }
}

impl CorsConfig {
    /// Builds the CORS policy applied by the router.
    pub fn policy(&self) -> CorsPolicy {
        CorsPolicy::with_origins(self.allowed_origins.iter().cloned()).max_age(self.max_age_seconds)
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics
    pub prometheus_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            prometheus_enabled: env_flag("OBJDIR_METRICS_ENABLED", true),
        }
    }
}

impl Config {
    /// Loads configuration from the environment and validates it.
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that have no usable default.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.bucket.trim().is_empty() {
            bail!("S3_BUCKET_NAME must be set");
        }

        let expiration = self.storage.url_expiration_secs;
        if !(1..=MAX_URL_EXPIRATION_SECS).contains(&expiration) {
            bail!(
                "URL_EXPIRATION_TIME must be between 1 and {} seconds, got {}",
                MAX_URL_EXPIRATION_SECS,
                expiration
            );
        }

        if self.listing.url_concurrency == 0 {
            bail!("OBJDIR_URL_CONCURRENCY must be at least 1");
        }

        self.server
            .tls
            .validate()
            .map_err(|e| anyhow::anyhow!("TLS configuration error: {}", e))?;

        self.cors.policy().validate().context("Invalid CORS configuration")?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cdn: CdnConfig::from_env(),
            listing: ListingConfig::default(),
            cors: CorsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Parses a boolean flag: "true" (any case) or "1" is true.
pub fn parse_flag(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s == "1"
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name).map(|s| parse_flag(&s)).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
