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

//! objdir Core - Virtual directory listing over a flat object namespace.
//!
//! This crate provides:
//! - Data model for storage entries and synthesized listings
//! - Content type resolution from file names
//! - The virtual directory builder (files, folders, breadcrumbs)
//! - Collaborator traits for the object store and the CDN cache

#![warn(missing_docs)]

pub mod cdn;
pub mod content_type;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod types;

pub use error::BackendError;
pub use gateway::{CacheInvalidator, StorageGateway, DEFAULT_DELIMITER};
pub use listing::{build_listing, normalize_prefix, path_segments, ListingBuilder, PrefixMode};
pub use types::{ListingResult, PathSegment, StorageEntry, VirtualFile, VirtualFolder};
