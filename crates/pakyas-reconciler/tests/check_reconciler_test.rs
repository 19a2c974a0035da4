// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CheckReconciler against a mock API.

mod common;

use pakyas_client::{CheckStatus, ResourceKind};
use pakyas_reconciler::{
    CheckConfig, CheckReconciler, Operation, Plan, ReadOutcome, ReconcileError, Reconciler,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{PING_BASE, check_json, connect, mount_get};

fn daily_backup() -> CheckConfig {
    CheckConfig::new("prj-1", "Daily backup", "daily-backup", 86_400)
        .with_grace_seconds(3_600)
        .with_tags(["database", "backup"])
}

#[tokio::test]
async fn test_create_sorts_tags_and_derives_ping_url() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    Mock::given(method("POST"))
        .and(path("/api/v1/checks"))
        .and(body_json(json!({
            "project_id": "prj-1",
            "name": "Daily backup",
            "slug": "daily-backup",
            "period_seconds": 86400,
            "grace_seconds": 3600,
            "tags": ["backup", "database"],
            "paused": false
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(check_json("chk-1", "daily-backup", &["backup", "database"], false)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["database", "backup"], false),
    )
    .await;

    let state = reconciler.create(&daily_backup()).await.unwrap();

    assert_eq!(state.tags, vec!["backup", "database"]);
    assert_eq!(state.ping_url, format!("{}/pub-chk-1", PING_BASE));
    assert_eq!(reconciler.plan(Some(&daily_backup()), Some(&state)), Plan::NoOp);
}

#[tokio::test]
async fn test_read_is_tag_order_independent() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["database", "backup"], false),
    )
    .await;
    mount_get(
        &server,
        "/api/v1/checks/chk-2",
        check_json("chk-2", "daily-backup", &["backup", "database"], false),
    )
    .await;

    let a = reconciler.read("chk-1").await.unwrap().into_option().unwrap();
    let b = reconciler.read("chk-2").await.unwrap().into_option().unwrap();
    assert_eq!(a.tags, b.tags);
}

#[tokio::test]
async fn test_pause_sends_only_paused() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    let prior = reconciler.import("chk-1").await.unwrap();
    server.reset().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/checks/chk-1"))
        .and(body_json(json!({"paused": true})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], true),
    )
    .await;

    let state = reconciler
        .update(&daily_backup().with_paused(true), &prior)
        .await
        .unwrap();
    assert!(state.paused);
}

#[tokio::test]
async fn test_slug_change_requires_replacement() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    let prior = reconciler.import("chk-1").await.unwrap();

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut desired = daily_backup();
    desired.slug = "weekly-backup".to_string();

    assert_eq!(
        reconciler.plan(Some(&desired), Some(&prior)),
        Plan::Replace {
            fields: vec!["slug"]
        }
    );

    let err = reconciler.update(&desired, &prior).await.unwrap_err();
    match err {
        ReconcileError::RequiresReplacement { kind, id, fields } => {
            assert_eq!(kind, ResourceKind::Check);
            assert_eq!(id, "chk-1");
            assert_eq!(fields, vec!["slug"]);
        }
        other => panic!("expected RequiresReplacement, got {other:?}"),
    }
}

#[tokio::test]
async fn test_converge_replaces_on_slug_change() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    let prior = reconciler.import("chk-1").await.unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/checks"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(check_json(
                "chk-2",
                "weekly-backup",
                &["backup", "database"],
                false,
            )),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/api/v1/checks/chk-2",
        check_json("chk-2", "weekly-backup", &["backup", "database"], false),
    )
    .await;

    let mut desired = daily_backup();
    desired.slug = "weekly-backup".to_string();

    let state = reconciler
        .converge(Some(&desired), Some(&prior))
        .await
        .unwrap()
        .expect("check should exist");
    assert_eq!(state.id, "chk-2");
    assert_eq!(state.slug, "weekly-backup");
}

#[tokio::test]
async fn test_converge_unchanged_only_reads() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let prior = reconciler.import("chk-1").await.unwrap();
    let state = reconciler
        .converge(Some(&daily_backup()), Some(&prior))
        .await
        .unwrap();
    assert_eq!(state, Some(prior));
}

#[tokio::test]
async fn test_read_not_found_removes_from_state() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    Mock::given(method("GET"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(reconciler.read("chk-1").await.unwrap(), ReadOutcome::Absent);
}

#[tokio::test]
async fn test_invalid_period_rejected_before_network() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let desired = CheckConfig::new("prj-1", "Too fast", "too-fast", 30);
    let err = reconciler.create(&desired).await.unwrap_err();
    assert!(matches!(err, ReconcileError::Validation(ref v) if v.has_field("period_seconds")));
}

#[tokio::test]
async fn test_server_error_exhausts_retries_then_fails_update() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    let prior = reconciler.import("chk-1").await.unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(6)
        .mount(&server)
        .await;

    let err = reconciler
        .update(&daily_backup().with_paused(true), &prior)
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("failed to update check chk-1: max retries exceeded"));
}

#[tokio::test]
async fn test_converge_invalid_replacement_keeps_existing_check() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    let prior = reconciler.import("chk-1").await.unwrap();
    server.reset().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut desired = daily_backup();
    desired.slug = "weekly-backup".to_string();
    desired.period_seconds = 10;

    let err = reconciler
        .converge(Some(&desired), Some(&prior))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::Validation(ref v) if v.has_field("period_seconds")));
}

#[tokio::test]
async fn test_import_existing_check() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    Mock::given(method("GET"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_json(
            "chk-1",
            "daily-backup",
            &["database", "backup"],
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let state = reconciler.import("chk-1").await.unwrap();

    assert_eq!(state.id, "chk-1");
    assert_eq!(state.project_id, "prj-1");
    assert_eq!(state.slug, "daily-backup");
    assert_eq!(state.period_seconds, 86_400);
    assert_eq!(state.grace_seconds, 3_600);
    assert_eq!(state.tags, vec!["backup", "database"]);
    assert_eq!(state.status, CheckStatus::New);
    assert_eq!(state.ping_url, format!("{}/pub-chk-1", PING_BASE));
    assert!(state.deleted_at.is_none());
    assert_eq!(reconciler.plan(Some(&daily_backup()), Some(&state)), Plan::NoOp);
}

#[tokio::test]
async fn test_delete_existing_check() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    Mock::given(method("DELETE"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(reconciler.delete("chk-1").await.is_ok());
}

#[tokio::test]
async fn test_delete_missing_check_is_ok() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    Mock::given(method("DELETE"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert!(reconciler.delete("chk-1").await.is_ok());
}

#[tokio::test]
async fn test_update_vanished_check_fails() {
    let server = MockServer::start().await;
    let reconciler = CheckReconciler::new(connect(&server).await);

    mount_get(
        &server,
        "/api/v1/checks/chk-1",
        check_json("chk-1", "daily-backup", &["backup", "database"], false),
    )
    .await;
    let prior = reconciler.import("chk-1").await.unwrap();
    server.reset().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/checks/chk-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let err = reconciler
        .update(&daily_backup().with_paused(true), &prior)
        .await
        .unwrap_err();
    match err {
        ReconcileError::Operation {
            operation,
            kind,
            id,
            source,
        } => {
            assert_eq!(operation, Operation::Update);
            assert_eq!(kind, ResourceKind::Check);
            assert_eq!(id.as_deref(), Some("chk-1"));
            assert!(source.is_not_found());
        }
        other => panic!("expected Operation error, got {other:?}"),
    }
    assert_eq!(prior.id, "chk-1");
    assert!(!prior.paused);
}
