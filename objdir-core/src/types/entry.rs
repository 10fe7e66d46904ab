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

//! Storage entries as reported by the object store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single object (or common prefix) returned by a bucket listing.
///
/// Entries are produced by the storage backend and are never modified by
/// this crate. Common prefixes from a delimited listing are represented as
/// entries whose key ends with the delimiter, with zero size and no
/// modification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEntry {
    /// Full object key, unique within the bucket.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time, if the backend reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl StorageEntry {
    /// Creates an entry for a stored object.
    pub fn object(key: impl Into<String>, size: u64, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
        }
    }

    /// Creates an entry for a common prefix (a folder-like grouping of keys).
    pub fn common_prefix(prefix: impl Into<String>) -> Self {
        Self {
            key: prefix.into(),
            size: 0,
            last_modified: None,
        }
    }
}
