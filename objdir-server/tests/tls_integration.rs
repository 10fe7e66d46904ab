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

//! TLS integration tests for the objdir server.
//!
//! These tests verify certificate loading through `load_tls_config`.

use objdir_server::app::load_tls_config;
use objdir_server::config::TlsConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn tls_config(cert_path: PathBuf, key_path: PathBuf) -> TlsConfig {
    TlsConfig {
        enabled: true,
        cert_path: Some(cert_path),
        key_path: Some(key_path),
    }
}

/// Generates a self-signed certificate and key with openssl.
///
/// Returns `None` when openssl is not available.
fn generate_test_certs(dir: &Path) -> Option<(PathBuf, PathBuf)> {
    let cert_path = dir.join("cert.pem");
    let key_path = dir.join("key.pem");

    let output = std::process::Command::new("openssl")
        .args([
            "req",
            "-x509",
            "-newkey",
            "rsa:2048",
            "-keyout",
            key_path.to_str()?,
            "-out",
            cert_path.to_str()?,
            "-days",
            "1",
            "-nodes",
            "-subj",
            "/CN=localhost",
        ])
        .output()
        .ok()?;

    if !output.status.success() {
        eprintln!(
            "OpenSSL stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        return None;
    }
    Some((cert_path, key_path))
}

#[tokio::test]
async fn test_load_valid_certs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let Some((cert_path, key_path)) = generate_test_certs(temp_dir.path()) else {
        eprintln!("openssl not available, skipping");
        return;
    };

    let result = load_tls_config(&tls_config(cert_path, key_path)).await;

    assert!(
        result.is_ok(),
        "Should successfully load TLS config: {:?}",
        result.err()
    );
}

#[tokio::test]
async fn test_load_invalid_cert_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cert_path = temp_dir.path().join("invalid_cert.pem");
    let key_path = temp_dir.path().join("invalid_key.pem");
    std::fs::write(&cert_path, b"not a valid certificate").unwrap();
    std::fs::write(&key_path, b"not a valid key").unwrap();

    let err = load_tls_config(&tls_config(cert_path, key_path))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to load TLS certificate"));
}

#[tokio::test]
async fn test_load_missing_files_fails() {
    let result = load_tls_config(&tls_config(
        PathBuf::from("/nonexistent/cert.pem"),
        PathBuf::from("/nonexistent/key.pem"),
    ))
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_load_without_paths_fails() {
    let config = TlsConfig {
        enabled: true,
        cert_path: None,
        key_path: Some(PathBuf::from("/path/to/key.pem")),
    };

    let err = load_tls_config(&config).await.unwrap_err();

    assert!(err.to_string().contains("certificate path not configured"));
}
