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

//! Amazon S3 backed [`StorageGateway`].

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use objdir_core::{BackendError, StorageEntry, StorageGateway};
use tracing::debug;

/// Object store gateway over one S3 bucket.
#[derive(Clone)]
pub struct S3Gateway {
    client: Client,
    bucket: String,
    url_expiration: Duration,
}

impl S3Gateway {
    /// Creates a gateway for `bucket`. Issued URLs expire after `url_expiration`.
    pub fn new(client: Client, bucket: impl Into<String>, url_expiration: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            url_expiration,
        }
    }

    /// Bucket this gateway operates on.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn presigning_config(&self, key: &str) -> Result<PresigningConfig, BackendError> {
        PresigningConfig::expires_in(self.url_expiration)
            .map_err(|e| BackendError::presign(key, e.to_string()))
    }
}

#[async_trait]
impl StorageGateway for S3Gateway {
    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<StorageEntry>, BackendError> {
        let mut entries = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .delimiter(delimiter)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| {
                    BackendError::storage("ListObjectsV2", DisplayErrorContext(&e).to_string())
                })?;

            pages += 1;
            entries.extend(entries_from_page(&output));

            match output.next_continuation_token() {
                Some(token) => continuation_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(
            "Listed {} entries under {:?} in {} page(s)",
            entries.len(),
            prefix,
            pages
        );
        Ok(entries)
    }

    async fn issue_download_url(&self, key: &str) -> Result<String, BackendError> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(self.presigning_config(key)?)
            .await
            .map_err(|e| BackendError::presign(key, DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn issue_upload_url(&self, key: &str, content_type: &str) -> Result<String, BackendError> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(self.presigning_config(key)?)
            .await
            .map_err(|e| BackendError::presign(key, DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> Result<(), BackendError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BackendError::storage("DeleteObject", DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

/// Converts one listing page into entries: objects first, then common prefixes.
fn entries_from_page(output: &ListObjectsV2Output) -> Vec<StorageEntry> {
    let objects = output.contents().iter().filter_map(|object| {
        let key = object.key()?;
        let size = object.size().unwrap_or_default().max(0) as u64;
        let last_modified = object
            .last_modified()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()));
        Some(StorageEntry::object(key, size, last_modified))
    });

    let prefixes = output
        .common_prefixes()
        .iter()
        .filter_map(|p| p.prefix())
        .map(StorageEntry::common_prefix);

    objects.chain(prefixes).collect()
}
