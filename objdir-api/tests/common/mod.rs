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

//! Shared fixtures for the API integration tests.
//!
//! `FakeGateway` and `FakeInvalidator` stand in for the object store and the
//! CDN. They record every call so tests can assert on what the handlers did.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use objdir_api::{create_router, AppState};
use objdir_core::{BackendError, CacheInvalidator, StorageEntry, StorageGateway};
use serde_json::Value;
use tower::ServiceExt;

/// A call made to [`FakeGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List { prefix: String, delimiter: String },
    Download(String),
    Upload { key: String, content_type: String },
    Delete(String),
}

/// Gateway operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Download,
    Upload,
    Delete,
}

/// In-memory object store double.
#[derive(Default)]
pub struct FakeGateway {
    entries: Vec<StorageEntry>,
    failing: HashSet<Op>,
    failing_keys: HashSet<String>,
    url_delays: HashMap<String, Duration>,
    calls: Mutex<Vec<GatewayCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries returned verbatim by every listing.
    pub fn with_entries(mut self, entries: Vec<StorageEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.failing.insert(op);
        self
    }

    /// Download URLs for `key` fail.
    pub fn failing_key(mut self, key: &str) -> Self {
        self.failing_keys.insert(key.to_string());
        self
    }

    /// Download URLs for `key` take `delay` to issue.
    pub fn with_url_delay(mut self, key: &str, delay: Duration) -> Self {
        self.url_delays.insert(key.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of download URLs that were being issued at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: Op, operation: &'static str) -> Result<(), BackendError> {
        if self.failing.contains(&op) {
            return Err(BackendError::storage(operation, "simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for FakeGateway {
    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<StorageEntry>, BackendError> {
        self.record(GatewayCall::List {
            prefix: prefix.to_string(),
            delimiter: delimiter.to_string(),
        });
        self.check(Op::List, "ListObjectsV2")?;
        Ok(self.entries.clone())
    }

    async fn issue_download_url(&self, key: &str) -> Result<String, BackendError> {
        self.record(GatewayCall::Download(key.to_string()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.url_delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.check(Op::Download, "GetObject")?;
        if self.failing_keys.contains(key) {
            return Err(BackendError::presign(key, "simulated signing failure"));
        }
        Ok(download_url(key))
    }

    async fn issue_upload_url(&self, key: &str, content_type: &str) -> Result<String, BackendError> {
        self.record(GatewayCall::Upload {
            key: key.to_string(),
            content_type: content_type.to_string(),
        });
        self.check(Op::Upload, "PutObject")?;
        Ok(format!("https://bucket.test/{}?X-Amz-Signature=put", key))
    }

    async fn delete_object(&self, key: &str) -> Result<(), BackendError> {
        self.record(GatewayCall::Delete(key.to_string()));
        self.check(Op::Delete, "DeleteObject")
    }
}

/// URL the fake gateway issues for downloading `key`.
pub fn download_url(key: &str) -> String {
    format!("https://bucket.test/{}?X-Amz-Signature=get", key)
}

/// CDN invalidation double.
#[derive(Default)]
pub struct FakeInvalidator {
    fail: bool,
    requests: Mutex<Vec<Vec<String>>>,
}

impl FakeInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheInvalidator for FakeInvalidator {
    async fn invalidate(&self, paths: &[String]) -> Result<String, BackendError> {
        self.requests.lock().unwrap().push(paths.to_vec());
        if self.fail {
            return Err(BackendError::cache("AccessDenied: not authorized"));
        }
        Ok("I2J0I21PCUYOIK".to_string())
    }
}

/// Objects under `docs/` as a delimited listing returns them.
pub fn docs_entries() -> Vec<StorageEntry> {
    let modified = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();
    vec![
        StorageEntry::object("docs/", 0, modified),
        StorageEntry::object("docs/a.pdf", 100, modified),
        StorageEntry::object("docs/b.txt", 5, modified),
        StorageEntry::common_prefix("docs/img/"),
    ]
}

/// Creates a router over `gateway` with default settings.
pub fn router_with(gateway: Arc<FakeGateway>) -> Router {
    create_router(AppState::new(gateway))
}

/// Sends one request and returns the status, headers and JSON body.
///
/// A body that is not JSON is returned as a JSON string.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, headers, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
