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

//! MIME type resolution from file names.

/// Fallback MIME type for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Known extensions (lowercase) and their MIME types.
const CONTENT_TYPES: &[(&str, &str)] = &[
    // Documents
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("md", "text/markdown"),
    ("json", "application/json"),
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    // Office formats
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

/// Resolves a MIME type from a file name's extension.
///
/// The extension is the text after the last `.` and is matched
/// case-insensitively. Names without a `.` and unknown extensions resolve to
/// [`DEFAULT_CONTENT_TYPE`].
///
/// # Example
///
/// ```
/// use objdir_core::content_type::resolve;
///
/// assert_eq!(resolve("report.PDF"), "application/pdf");
/// assert_eq!(resolve("noext"), "application/octet-stream");
/// ```
pub fn resolve(file_name: &str) -> &'static str {
    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return DEFAULT_CONTENT_TYPE;
    };

    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_extensions() {
        assert_eq!(resolve("report.pdf"), "application/pdf");
        assert_eq!(resolve("photo.jpg"), "image/jpeg");
        assert_eq!(resolve("photo.jpeg"), "image/jpeg");
        assert_eq!(resolve("notes.txt"), "text/plain");
        assert_eq!(
            resolve("budget.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve("report.PDF"), "application/pdf");
        assert_eq!(resolve("IMAGE.Png"), "image/png");
    }

    #[test]
    fn test_resolve_uses_last_extension() {
        assert_eq!(resolve("archive.tar.gz"), DEFAULT_CONTENT_TYPE);
        assert_eq!(resolve("scan.2024.pdf"), "application/pdf");
    }

    #[test]
    fn test_resolve_fallbacks() {
        assert_eq!(resolve("noext"), DEFAULT_CONTENT_TYPE);
        assert_eq!(resolve("pdf"), DEFAULT_CONTENT_TYPE);
        assert_eq!(resolve("trailing."), DEFAULT_CONTENT_TYPE);
        assert_eq!(resolve(""), DEFAULT_CONTENT_TYPE);
        assert_eq!(resolve("file.unknown"), DEFAULT_CONTENT_TYPE);
    }
}
