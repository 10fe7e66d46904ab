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

//! CORS (Cross-Origin Resource Sharing) policy.
//!
//! Browser clients call the API directly, so every response carries
//! `Access-Control-Allow-Origin` and `Access-Control-Allow-Credentials`,
//! and preflight responses additionally advertise the allowed headers,
//! methods and cache lifetime.
//!
//! `tower_http::cors::CorsLayer` refuses a wildcard origin combined with
//! credentials, which is the default policy here, so headers are applied
//! by [`crate::middleware::cors_middleware`] instead.

use std::collections::HashSet;

use axum::http::{header, HeaderMap, HeaderValue};
use thiserror::Error;

/// Default allowed request headers.
pub const DEFAULT_ALLOWED_HEADERS: &[&str] = &["Content-Type", "X-Amz-Date", "Authorization", "X-Api-Key"];

/// Default allowed methods.
pub const DEFAULT_ALLOWED_METHODS: &[&str] = &["GET", "PUT", "POST", "DELETE", "OPTIONS"];

/// Default preflight cache lifetime (one day).
pub const DEFAULT_MAX_AGE_SECONDS: u32 = 86400;

/// Errors in a CORS policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorsError {
    /// No allowed origins configured.
    #[error("CORS policy must allow at least one origin")]
    NoAllowedOrigins,

    /// Unsupported HTTP method.
    #[error("Invalid CORS method: {0}")]
    InvalidMethod(String),

    /// Value cannot be used in an HTTP header.
    #[error("Invalid CORS header value: {0}")]
    InvalidHeaderValue(String),

    /// Max age exceeds one day.
    #[error("CORS max age cannot exceed 86400 seconds")]
    MaxAgeTooLarge,
}

/// CORS policy applied to every response.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Allowed origins. `*` allows any origin; `*.example.com` allows
    /// `example.com` and its subdomains.
    pub allowed_origins: Vec<String>,
    /// Whether to send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
    /// Headers advertised in preflight responses.
    pub allowed_headers: Vec<String>,
    /// Methods advertised in preflight responses.
    pub allowed_methods: Vec<String>,
    /// Preflight cache lifetime in seconds.
    pub max_age_seconds: u32,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
            allowed_headers: DEFAULT_ALLOWED_HEADERS.iter().map(|h| h.to_string()).collect(),
            allowed_methods: DEFAULT_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect(),
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
        }
    }
}

impl CorsPolicy {
    /// Creates the default policy restricted to the given origins.
    pub fn with_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the preflight cache lifetime.
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<(), CorsError> {
        if self.allowed_origins.is_empty() {
            return Err(CorsError::NoAllowedOrigins);
        }

        let valid_methods: HashSet<&str> =
            ["GET", "PUT", "POST", "DELETE", "HEAD", "OPTIONS"].into_iter().collect();
        for method in &self.allowed_methods {
            if !valid_methods.contains(method.to_uppercase().as_str()) {
                return Err(CorsError::InvalidMethod(method.clone()));
            }
        }

        for value in self.allowed_origins.iter().chain(&self.allowed_headers) {
            if HeaderValue::from_str(value).is_err() {
                return Err(CorsError::InvalidHeaderValue(value.clone()));
            }
        }

        if self.max_age_seconds > DEFAULT_MAX_AGE_SECONDS {
            return Err(CorsError::MaxAgeTooLarge);
        }

        Ok(())
    }

    /// Returns the `Access-Control-Allow-Origin` value for a request.
    ///
    /// A wildcard policy answers `*`. Otherwise the request origin is echoed
    /// back when it matches an allowed pattern, and `None` is returned when
    /// it does not.
    pub fn allow_origin_for(&self, origin: Option<&str>) -> Option<String> {
        if self.is_wildcard() {
            return Some("*".to_string());
        }

        let origin = origin?;
        self.allowed_origins
            .iter()
            .any(|pattern| origin_matches(pattern, origin))
            .then(|| origin.to_string())
    }

    /// Whether any origin is allowed.
    pub fn is_wildcard(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Adds the headers every response carries.
    ///
    /// Unless the policy is a wildcard, the allowed origin depends on the
    /// request `Origin`, so `Vary: Origin` is appended.
    pub fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        if !self.is_wildcard() {
            headers.append(header::VARY, HeaderValue::from_static("origin"));
        }
        if let Some(value) = self
            .allow_origin_for(origin)
            .and_then(|o| HeaderValue::from_str(&o).ok())
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
    }

    /// Adds the headers a preflight response carries.
    pub fn apply_preflight(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.allowed_headers.join(",")) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.allowed_methods.join(",")) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(self.max_age_seconds));
    }
}

/// Matches origin against pattern (supports wildcard subdomain prefix).
fn origin_matches(pattern: &str, origin: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(domain) => {
            let host = origin.split_once("://").map_or(origin, |(_, host)| host);
            host == domain || host.ends_with(&format!(".{domain}"))
        }
        None => pattern == origin,
    }
}
