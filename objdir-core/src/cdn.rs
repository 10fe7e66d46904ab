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

//! CDN path and URL helpers.

/// Returns the public CDN URL for `key` on `domain`.
///
/// ```
/// use objdir_core::cdn::cdn_url;
///
/// assert_eq!(cdn_url("d111.cloudfront.net", "/img/a.png"), "https://d111.cloudfront.net/img/a.png");
/// ```
pub fn cdn_url(domain: &str, key: &str) -> String {
    let key = key.strip_prefix('/').unwrap_or(key);
    format!("https://{}/{}", domain.trim_end_matches('/'), key)
}

/// Formats a key as a CDN invalidation path (always starting with `/`).
pub fn invalidation_path(key: &str) -> String {
    if key.starts_with('/') {
        key.to_string()
    } else {
        format!("/{}", key)
    }
}
