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

//! Amazon CloudFront backed [`CacheInvalidator`].

use async_trait::async_trait;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;
use chrono::{DateTime, Utc};
use objdir_core::{BackendError, CacheInvalidator};
use tracing::info;

/// Invalidates paths on one CloudFront distribution.
#[derive(Clone)]
pub struct CloudFrontInvalidator {
    client: Client,
    distribution_id: String,
}

impl CloudFrontInvalidator {
    /// Creates an invalidator for `distribution_id`.
    pub fn new(client: Client, distribution_id: impl Into<String>) -> Self {
        Self {
            client,
            distribution_id: distribution_id.into(),
        }
    }
}

#[async_trait]
impl CacheInvalidator for CloudFrontInvalidator {
    async fn invalidate(&self, paths: &[String]) -> Result<String, BackendError> {
        let batch = invalidation_batch(paths, &caller_reference(Utc::now()))?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(&self.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| BackendError::cache(DisplayErrorContext(&e).to_string()))?;

        let id = output
            .invalidation()
            .map(|invalidation| invalidation.id().to_string())
            .unwrap_or_default();

        info!(
            "Created invalidation {} on {} for {:?}",
            id, self.distribution_id, paths
        );
        Ok(id)
    }
}

/// Unique reference for one invalidation request.
fn caller_reference(now: DateTime<Utc>) -> String {
    format!("invalidation-{}", now.timestamp_millis())
}

/// Path count as the `i32` the CloudFront API expects.
fn path_quantity(count: usize) -> Result<i32, BackendError> {
    i32::try_from(count)
        .map_err(|_| BackendError::cache(format!("Too many invalidation paths: {}", count)))
}

fn invalidation_batch(paths: &[String], reference: &str) -> Result<InvalidationBatch, BackendError> {
    let paths = Paths::builder()
        .quantity(path_quantity(paths.len())?)
        .set_items(Some(paths.to_vec()))
        .build()
        .map_err(|e| BackendError::cache(e.to_string()))?;

    InvalidationBatch::builder()
        .paths(paths)
        .caller_reference(reference)
        .build()
        .map_err(|e| BackendError::cache(e.to_string()))
}
