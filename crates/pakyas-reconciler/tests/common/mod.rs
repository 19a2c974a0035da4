// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Mock API fixtures for reconciler tests.
#![allow(dead_code)]

use std::time::Duration;

use pakyas_client::{ClientConfig, PakyasClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PING_BASE: &str = "https://ping.example.test";

pub async fn connect(server: &MockServer) -> PakyasClient {
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organization_id": "org-1",
            "organization_name": "Acme",
            "scopes": [],
            "ping_url_base": format!("{}/", PING_BASE)
        })))
        .expect(1)
        .mount(server)
        .await;

    let config = ClientConfig::new("test-api-key")
        .with_base_url(server.uri())
        .with_retry_base_delay(Duration::from_millis(1));

    PakyasClient::connect(config)
        .await
        .expect("client should connect")
}

pub fn project_json(id: &str, name: &str, description: Option<&str>) -> Value {
    json!({
        "id": id,
        "org_id": "org-1",
        "name": name,
        "description": description,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

pub fn check_json(id: &str, slug: &str, tags: &[&str], paused: bool) -> Value {
    json!({
        "id": id,
        "project_id": "prj-1",
        "name": "Daily backup",
        "slug": slug,
        "period_seconds": 86400,
        "grace_seconds": 3600,
        "description": null,
        "tags": tags,
        "paused": paused,
        "public_id": format!("pub-{}", id),
        "status": "new",
        "created_at": "2025-01-01T00:00:00Z"
    })
}

/// Respond to GET `resource_path` with `body`.
pub async fn mount_get(server: &MockServer, resource_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(resource_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
