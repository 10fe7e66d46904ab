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

//! Listing handler.
//!
//! Implements `GET /files`: lists one level of the bucket below a prefix
//! and shapes it into files, folders and breadcrumbs.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use objdir_core::{
    BackendError, ListingBuilder, ListingResult, StorageGateway, VirtualFile, DEFAULT_DELIMITER,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::server::AppState;

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Folder to list (e.g. "documents/2023/"). Empty lists the bucket root.
    pub prefix: Option<String>,
    /// `"true"` to attach a download URL to every file.
    pub generate_urls: Option<String>,
}

impl ListFilesQuery {
    fn wants_urls(&self) -> bool {
        self.generate_urls.as_deref() == Some("true")
    }
}

/// Lists files and folders below a prefix.
///
/// # Returns
///
/// - 200 OK with `{files, folders, pathSegments, currentPath}`
/// - 500 if the listing or any download URL fails
pub async fn list_files(
    State(state): State<AppState>,
    query: Result<Query<ListFilesQuery>, QueryRejection>,
) -> Result<Json<ListingResult>, ApiError> {
    let Query(params) = query?;
    let generate_urls = params.wants_urls();
    let builder =
        ListingBuilder::new(params.prefix.as_deref().unwrap_or_default()).prefix_mode(state.prefix_mode);

    debug!(
        "ListFiles: prefix={:?}, generate_urls={}",
        builder.prefix(),
        generate_urls
    );

    let entries = state
        .storage
        .list_objects(builder.prefix(), DEFAULT_DELIMITER)
        .await
        .map_err(|e| ApiError::backend("Error listing files", e))?;

    let mut listing = builder.build(&entries);

    if generate_urls {
        attach_download_urls(state.storage.as_ref(), &mut listing.files, state.url_concurrency)
            .await
            .map_err(|e| ApiError::backend("Error listing files", e))?;
    }

    debug!(
        "ListFiles: {} files, {} folders under {:?}",
        listing.files.len(),
        listing.folders.len(),
        listing.current_path
    );

    Ok(Json(listing))
}

/// Issues a download URL for every file, at most `concurrency` at a time.
///
/// URLs are written back in the order of `files`. The first failure aborts
/// the remaining requests.
pub async fn attach_download_urls(
    storage: &dyn StorageGateway,
    files: &mut [VirtualFile],
    concurrency: usize,
) -> Result<(), BackendError> {
    let requests: Vec<_> = files
        .iter()
        .map(|file| storage.issue_download_url(&file.key))
        .collect();

    let urls: Vec<String> = stream::iter(requests)
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    for (file, url) in files.iter_mut().zip(urls) {
        file.download_url = Some(url);
    }

    Ok(())
}
