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

//! HTTP request handlers.
//!
//! This module provides handlers for:
//! - Directory-style listing of a prefix (with optional download URLs)
//! - Download URLs, upload URLs and deletion of single objects
//! - CORS preflight and unmatched routes
//! - Metrics and health endpoints
//!
//! Handlers never let a backend failure escape: every error is turned into
//! a JSON failure response by [`ApiError`](crate::ApiError).

pub mod files;
pub mod object;
pub mod preflight;
pub mod stats;

pub use files::{attach_download_urls, list_files, ListFilesQuery};
pub use object::{
    delete_file, get_file_url, key_required, get_upload_url, DeleteResponse,
    FileUrlQuery, FileUrlResponse, UploadHeaders, UploadUrlRequest, UploadUrlResponse,
};
pub use preflight::{not_found, preflight};
