// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared fixtures for pakyas-client integration tests.
#![allow(dead_code)]

use std::time::Duration;

use pakyas_client::{ClientConfig, PakyasClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const ORG_ID: &str = "org-1";
pub const PING_BASE: &str = "https://ping.example.test";

/// Config pointed at the mock server with millisecond backoff.
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(API_KEY)
        .with_base_url(server.uri())
        .with_request_timeout(Duration::from_secs(5))
        .with_retry_base_delay(Duration::from_millis(1))
}

pub fn me_json(ping_url_base: &str) -> Value {
    json!({
        "organization_id": ORG_ID,
        "organization_name": "Acme",
        "scopes": ["projects:write", "checks:write"],
        "ping_url_base": ping_url_base
    })
}

pub async fn mount_me(server: &MockServer, ping_url_base: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_json(ping_url_base)))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount `/api/v1/me` and connect.
pub async fn connect(server: &MockServer) -> PakyasClient {
    mount_me(server, PING_BASE).await;
    PakyasClient::connect(test_config(server))
        .await
        .expect("client should connect")
}

pub fn project_json(id: &str, name: &str, description: Option<&str>) -> Value {
    json!({
        "id": id,
        "org_id": ORG_ID,
        "name": name,
        "description": description,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z"
    })
}

pub fn check_json(id: &str, tags: &[&str], paused: bool) -> Value {
    json!({
        "id": id,
        "project_id": "prj-1",
        "name": "Daily backup",
        "slug": "daily-backup",
        "period_seconds": 86400,
        "grace_seconds": 3600,
        "description": null,
        "tags": tags,
        "paused": paused,
        "public_id": "pub-abc",
        "status": if paused { "paused" } else { "new" },
        "created_at": "2025-01-01T00:00:00Z"
    })
}
