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

//! Virtual directory listing.
//!
//! Object stores have no directories: a bucket is a flat map from keys to
//! objects. This module synthesizes a one-level directory view for a prefix
//! by partitioning the entries below it into immediate-child files and
//! immediate-child folders, and computes breadcrumb segments for the prefix
//! itself.
//!
//! Every entry under the prefix lands in exactly one bucket:
//! - the folder marker for the prefix itself (skipped),
//! - a [`VirtualFolder`] (deduplicated by folder path),
//! - a [`VirtualFile`].
//!
//! The transformation is pure: entries are borrowed and never modified, and
//! building twice from the same input yields the same result.

use std::collections::HashSet;

use tracing::debug;

use crate::content_type;
use crate::types::{ListingResult, PathSegment, StorageEntry, VirtualFile, VirtualFolder};

/// Path separator used to emulate directories.
pub const SEPARATOR: char = '/';

/// How to treat entries whose key does not start with the listed prefix.
///
/// A well-behaved backend only returns keys under the requested prefix, so
/// this only matters for malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMode {
    /// Skip entries outside the prefix.
    #[default]
    Strict,
    /// Classify entries outside the prefix by their full key, as if the
    /// listing were rooted at the bucket.
    Lenient,
}

/// Normalizes a prefix so that a non-empty prefix always ends in `/`.
///
/// ```
/// use objdir_core::normalize_prefix;
///
/// assert_eq!(normalize_prefix(""), "");
/// assert_eq!(normalize_prefix("docs"), "docs/");
/// assert_eq!(normalize_prefix("docs/"), "docs/");
/// ```
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(SEPARATOR) {
        prefix.to_string()
    } else {
        format!("{prefix}{SEPARATOR}")
    }
}

/// Computes cumulative breadcrumb segments for a prefix.
///
/// Empty components (leading, trailing or doubled separators) are dropped.
pub fn path_segments(prefix: &str) -> Vec<PathSegment> {
    let names: Vec<&str> = prefix.split(SEPARATOR).filter(|s| !s.is_empty()).collect();

    names
        .iter()
        .enumerate()
        .map(|(index, name)| PathSegment {
            name: (*name).to_string(),
            path: names[..=index].join("/"),
        })
        .collect()
}

/// Builds a directory-style listing of `entries` under `prefix`.
///
/// Uses [`PrefixMode::Strict`]; see [`ListingBuilder`] for other modes.
pub fn build_listing(entries: &[StorageEntry], prefix: &str) -> ListingResult {
    ListingBuilder::new(prefix).build(entries)
}

/// Builder for directory-style listings.
#[derive(Debug, Clone)]
pub struct ListingBuilder {
    prefix: String,
    mode: PrefixMode,
}

impl ListingBuilder {
    /// Creates a builder for the given prefix. The prefix is normalized.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            mode: PrefixMode::default(),
        }
    }

    /// Sets how entries outside the prefix are handled.
    pub fn prefix_mode(mut self, mode: PrefixMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the normalized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Partitions `entries` into files and folders.
    ///
    /// Files and folders keep the order of `entries`; folders are reported
    /// once, at the position of the first entry that maps to them.
    pub fn build(&self, entries: &[StorageEntry]) -> ListingResult {
        let mut result = ListingResult {
            path_segments: path_segments(&self.prefix),
            current_path: self.prefix.clone(),
            ..Default::default()
        };
        let mut seen_folders: HashSet<String> = HashSet::new();

        for entry in entries {
            let Some(relative) = self.relative_path(&entry.key) else {
                debug!(
                    "Skipping key outside prefix: key={}, prefix={}",
                    entry.key, self.prefix
                );
                continue;
            };

            // Folder marker for the prefix itself
            if relative.is_empty() {
                continue;
            }

            match relative.split_once(SEPARATOR) {
                Some((folder_name, _)) => {
                    let folder_path = format!("{}{}{}", self.prefix, folder_name, SEPARATOR);
                    if seen_folders.insert(folder_path.clone()) {
                        result.folders.push(VirtualFolder {
                            path: folder_path,
                            name: folder_name.to_string(),
                        });
                    }
                }
                None => result.files.push(VirtualFile {
                    key: entry.key.clone(),
                    name: relative.to_string(),
                    size: entry.size,
                    last_modified: entry.last_modified,
                    content_type: content_type::resolve(relative).to_string(),
                    download_url: None,
                }),
            }
        }

        result
    }

    /// Strips the prefix from `key`, or applies the [`PrefixMode`] fallback.
    fn relative_path<'a>(&self, key: &'a str) -> Option<&'a str> {
        match key.strip_prefix(self.prefix.as_str()) {
            Some(relative) => Some(relative),
            None => match self.mode {
                PrefixMode::Strict => None,
                PrefixMode::Lenient => Some(key),
            },
        }
    }
}
