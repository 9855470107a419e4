mod common;

use httpmock::prelude::*;
use qbank_gateway::api::{Board, Timeframe};
use qbank_gateway::{Outcome, StatusCode, Upload};
use qbank_sdk::{
    CompanyPayload, InvalidateQuestionRequest, ListParams, LoginRequest, Severity, SortOrder,
    VoteKind,
};
use serde_json::json;

use common::harness;

#[tokio::test]
async fn login_stores_token_used_by_next_call() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/authentication/login")
                .json_body(json!({"email": "admin@qbank.test", "password": "Secret@123"}));
            then.status(200)
                .json_body(json!({"token": "issued-token", "user": {"user_id": 1, "first_name": "Ada"}}));
        })
        .await;
    let authed = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users/1")
                .header("Authorization", "Bearer issued-token");
            then.status(200).json_body(json!({"id": 1, "company_name": "Acme"}));
        })
        .await;

    let h = harness(&server.url("/api"), None);
    let login = h
        .gateway
        .auth()
        .login(&LoginRequest {
            email: "admin@qbank.test".into(),
            password: "Secret@123".into(),
        })
        .await
        .unwrap();

    assert_eq!(login.user.unwrap().id, 1);
    assert!(h.gateway.session().is_authenticated());

    let company = h.gateway.companies().get(1).await.unwrap();
    assert_eq!(company.company_name.as_deref(), Some("Acme"));
    authed.assert_async().await;

    h.gateway.auth().logout().unwrap();
    assert!(!h.gateway.session().is_authenticated());
}

#[tokio::test]
async fn company_list_sends_role_and_listing_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users")
                .query_param("role", "company")
                .query_param("includeDetails", "true")
                .query_param("page", "1")
                .query_param("limit", "10")
                .query_param("search", "acme")
                .query_param("status", "active")
                .query_param("sortBy", "created_at")
                .query_param("sortOrder", "desc");
            then.status(200).json_body(json!({
                "users": [
                    {"id": 7, "company_name": "Acme Corp", "is_active": true},
                    {"id": 8, "company_name": "Acme Labs", "is_active": true}
                ],
                "total": 12
            }));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let params = ListParams::new()
        .role("writer")
        .page(1)
        .limit(10)
        .search(" acme ")
        .status("active")
        .sort("created_at", SortOrder::Desc);
    let page = h.gateway.companies().list(&params).await.unwrap();

    assert_eq!(page.total, 12);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].company_name.as_deref(), Some("Acme Labs"));
    mock.assert_async().await;
}

#[tokio::test]
async fn company_create_forces_role() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/users")
                .json_body_includes(r#"{"role": "company", "company_name": "Acme"}"#);
            then.status(201).json_body(json!({"id": 40}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let payload = CompanyPayload {
        company_name: "Acme".into(),
        country: "India".into(),
        ..CompanyPayload::default()
    };
    let created = h.gateway.companies().create(&payload).await.unwrap();

    assert_eq!(created["id"], 40);
    mock.assert_async().await;
}

#[tokio::test]
async fn status_toggle_patches_is_active() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/api/user_management/users/7/status")
                .json_body(json!({"is_active": false}));
            then.status(200).json_body(json!({"message": "updated"}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    h.gateway.users().set_status(7, false).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn roles_are_normalized_from_any_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/role_management/roles");
            then.status(200).json_body(json!({
                "success": true,
                "data": [{"role_id": 1, "name": "admin"}, {"role_id": 2, "name": "company"}]
            }));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let roles = h.gateway.roles().list(&ListParams::new()).await.unwrap();

    let names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["admin", "company"]);
    assert_eq!(roles[1].id, 2);
}

#[tokio::test]
async fn question_not_found_is_an_outcome_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/questions/5");
            then.status(404).json_body(json!({"message": "Question not found"}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let outcome = h.gateway.questions().get(5).await.unwrap();

    assert_eq!(outcome.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(outcome.message(), Some("Question not found"));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn question_votes_and_invalidation_bodies() {
    let server = MockServer::start_async().await;
    let vote = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/questions/3/vote")
                .json_body(json!({"vote": "up"}));
            then.status(200).json_body(json!({"upvotes": 4}));
        })
        .await;
    let invalidate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/questions/3/invalidate")
                .json_body(json!({"reason": "Duplicate", "severity": "high", "reviewedBy": 9}));
            then.status(200).json_body(json!({"status": "invalidated"}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let questions = h.gateway.questions();
    assert!(questions.vote(3, VoteKind::Up).await.unwrap().is_success());
    let result = questions
        .invalidate(
            3,
            &InvalidateQuestionRequest {
                reason: "Duplicate".into(),
                severity: Severity::High,
                reviewed_by: 9,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.success().unwrap()["status"], "invalidated");
    vote.assert_async().await;
    invalidate.assert_async().await;
}

#[tokio::test]
async fn question_import_is_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/questions/import")
                .header_includes("content-type", "multipart/form-data")
                .body_includes("filename=\"questions.csv\"")
                .body_includes("What is Rust?");
            then.status(200).json_body(json!({"imported": 1}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let outcome = h
        .gateway
        .questions()
        .import(Upload::csv("questions.csv", "text\nWhat is Rust?\n"))
        .await
        .unwrap();

    assert!(outcome.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn template_download_uses_header_name_or_default() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user_management/users/template");
            then.status(200)
                .header("Content-Disposition", "attachment; filename=\"users.csv\"")
                .body("first_name,last_name,email\n");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/role_management/roles/template");
            then.status(200).body("name,description\n");
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let users = h.gateway.users().download_template().await.unwrap();
    let roles = h.gateway.roles().download_template().await.unwrap();

    assert_eq!(users.file_name, "users.csv");
    assert_eq!(&users.bytes[..], b"first_name,last_name,email\n");
    assert_eq!(roles.file_name, "role-template.csv");
}

#[tokio::test]
async fn leaderboard_selects_board_and_timeframe() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/leaderboard")
                .query_param("board", "employees")
                .query_param("timeframe", "all");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Ada", "score": 42},
                {"id": 2, "name": "Linus", "score": 40}
            ]));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let entries = h
        .gateway
        .leaderboard()
        .get(Board::Employees, Timeframe::All)
        .await
        .unwrap();

    match entries {
        Outcome::Success(entries) => assert_eq!(entries[0].score, 42),
        Outcome::ClientError { status, .. } => panic!("unexpected {status}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn bulk_operations_send_id_lists() {
    let server = MockServer::start_async().await;
    let users = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/user_management/users/bulk-delete")
                .json_body(json!({"userIds": [1, 2]}));
            then.status(200).json_body(json!({"deleted": 2}));
        })
        .await;
    let favorites = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/favorites/bulk-remove")
                .json_body(json!({"favoriteIds": [5]}));
            then.status(200).json_body(json!({"removed": 1}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    h.gateway.users().bulk_delete(&[1, 2]).await.unwrap();
    let removed = h.gateway.favorites().bulk_remove(&[5]).await.unwrap();

    assert!(removed.is_success());
    users.assert_async().await;
    favorites.assert_async().await;
}
