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

//! Listing types synthesized from storage entries.
//!
//! Everything here is derived per request and never persisted. The JSON
//! shape matches what browser clients of the listing endpoint expect:
//! folders carry their prefix under `key`, and both files and folders
//! carry an `isFolder` flag.

use chrono::{DateTime, Utc};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// A folder synthesized from the keys below a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFolder {
    /// Full prefix of the folder, always ending in `/`.
    pub path: String,
    /// Last path segment (the folder's display name).
    pub name: String,
}

impl Serialize for VirtualFolder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VirtualFolder", 4)?;
        state.serialize_field("key", &self.path)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("isFolder", &true)?;
        state.serialize_field("type", "folder")?;
        state.end()
    }
}

/// A file that is an immediate child of the listed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    /// Full object key.
    pub key: String,
    /// Key relative to the listed prefix.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// MIME type guessed from the file name.
    pub content_type: String,
    /// Time-limited download URL, when requested.
    pub download_url: Option<String>,
}

impl Serialize for VirtualFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VirtualFile", 7)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("size", &self.size)?;
        match &self.last_modified {
            Some(ts) => state.serialize_field("lastModified", ts)?,
            None => state.skip_field("lastModified")?,
        }
        state.serialize_field("contentType", &self.content_type)?;
        state.serialize_field("isFolder", &false)?;
        match &self.download_url {
            Some(url) => state.serialize_field("downloadUrl", url)?,
            None => state.skip_field("downloadUrl")?,
        }
        state.end()
    }
}

/// One breadcrumb component of the current prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    /// Segment name.
    pub name: String,
    /// Cumulative path up to and including this segment (no trailing `/`).
    pub path: String,
}

/// Result of a directory-style listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult {
    /// Immediate child files, in input order.
    pub files: Vec<VirtualFile>,
    /// Immediate child folders, deduplicated, in first-seen order.
    pub folders: Vec<VirtualFolder>,
    /// Breadcrumbs for the current prefix.
    pub path_segments: Vec<PathSegment>,
    /// Normalized prefix that was listed.
    pub current_path: String,
}
