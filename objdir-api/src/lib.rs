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

//! objdir API Layer - HTTP handlers for bucket browsing.
//!
//! This crate provides:
//! - Directory-style listing of a bucket prefix
//! - Time-limited download and upload URLs
//! - Object deletion with best-effort CDN invalidation
//! - CORS handling, request logging and metrics middleware

pub mod cors;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use cors::CorsPolicy;
pub use error::{ApiError, ErrorBody};
pub use server::{create_router, AppState, DEFAULT_URL_CONCURRENCY};
