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

//! Error types for storage and cache collaborators.

use thiserror::Error;

/// Errors returned by a [`StorageGateway`](crate::StorageGateway) or
/// [`CacheInvalidator`](crate::CacheInvalidator).
///
/// The message carries the stringified backend failure; it is surfaced to
/// clients verbatim in the `error` field of a failure response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// An object store request failed.
    #[error("Storage error during {operation}: {message}")]
    Storage {
        /// Operation that was attempted (e.g. "ListObjectsV2").
        operation: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// A time-limited URL could not be issued.
    #[error("Failed to presign URL for {key}: {message}")]
    Presign {
        /// Object key the URL was requested for.
        key: String,
        /// Underlying error message.
        message: String,
    },

    /// A CDN cache request failed.
    #[error("Cache error: {message}")]
    Cache {
        /// Underlying error message.
        message: String,
    },
}

impl BackendError {
    /// Creates a storage error for the given operation.
    pub fn storage(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Storage {
            operation,
            message: message.into(),
        }
    }

    /// Creates a presigning error for the given key.
    pub fn presign(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Presign {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}
