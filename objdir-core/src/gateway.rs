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

//! Collaborator interfaces for the object store and the CDN cache.
//!
//! Implementations are constructed once at process start and shared
//! read-only by every request (typically behind an `Arc<dyn ...>`).

use async_trait::async_trait;

use crate::error::BackendError;
use crate::types::StorageEntry;

/// Delimiter used to group keys into common prefixes.
pub const DEFAULT_DELIMITER: &str = "/";

/// Object store operations used by the request handlers.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Lists entries under `prefix`, grouping deeper keys by `delimiter`.
    ///
    /// # Returns
    ///
    /// Objects directly under the prefix followed by one entry per common
    /// prefix (see [`StorageEntry::common_prefix`]).
    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<StorageEntry>, BackendError>;

    /// Issues a time-limited URL for downloading `key`.
    async fn issue_download_url(&self, key: &str) -> Result<String, BackendError>;

    /// Issues a time-limited URL for uploading `key` with a `PUT` request.
    ///
    /// The uploader must send the same `Content-Type` header.
    async fn issue_upload_url(&self, key: &str, content_type: &str)
        -> Result<String, BackendError>;

    /// Deletes `key` from the bucket.
    async fn delete_object(&self, key: &str) -> Result<(), BackendError>;
}

/// CDN cache invalidation.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Invalidates cached copies of `paths`.
    ///
    /// # Returns
    ///
    /// The invalidation ID assigned by the CDN.
    async fn invalidate(&self, paths: &[String]) -> Result<String, BackendError>;
}
