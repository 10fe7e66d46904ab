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

//! Integration tests for CORS functionality.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{delete, get, post_json, router_with, send, FakeGateway, Op};
use objdir_api::{create_router, AppState, CorsPolicy};
use serde_json::json;

fn options(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_preflight_on_every_route() {
    for uri in [
        "/files",
        "/files/",
        "/files/docs/a.pdf",
        "/upload-url",
        "/health",
        "/metrics",
    ] {
        let gateway = Arc::new(FakeGateway::new());
        let (status, headers, body) = send(router_with(gateway.clone()), options(uri)).await;

        assert_eq!(status, StatusCode::OK, "preflight {}", uri);
        assert_eq!(body, json!({ "message": "CORS enabled" }));
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET,PUT,POST,DELETE,OPTIONS"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
        assert!(gateway.calls().is_empty());
    }
}

#[tokio::test]
async fn test_cors_headers_on_success() {
    let gateway = Arc::new(FakeGateway::new());

    let (status, headers, _) = send(router_with(gateway), get("/files")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).is_none());
    assert!(headers.get(header::VARY).is_none());
}

#[tokio::test]
async fn test_cors_headers_on_errors() {
    let gateway = Arc::new(FakeGateway::new().failing(Op::Delete));

    let (status, headers, _) = send(router_with(gateway.clone()), delete("/files/a.txt")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let (status, headers, _) = send(
        router_with(gateway.clone()),
        post_json("/upload-url", "{}"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let (status, headers, body) = send(router_with(gateway), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No route for /nope");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_headers_on_method_not_allowed() {
    let gateway = Arc::new(FakeGateway::new());
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/files")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(router_with(gateway), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_restricted_origin_is_echoed() {
    let gateway = Arc::new(FakeGateway::new());
    let policy = CorsPolicy::with_origins(["https://files.example.com"]).max_age(600);
    let router = create_router(AppState::new(gateway).with_cors_policy(policy));

    let request = Request::builder()
        .uri("/files")
        .header(header::ORIGIN, "https://files.example.com")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(router.clone(), request).await;
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://files.example.com"
    );
    assert_eq!(headers[header::VARY], "origin");

    let request = Request::builder()
        .uri("/files")
        .header(header::ORIGIN, "https://evil.example.net")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert_eq!(headers[header::VARY], "origin");

    let (_, headers, _) = send(router, options("/files")).await;
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "600");
}
