mod common;

use std::time::Duration;

use httpmock::prelude::*;
use qbank_console::{CompanyDetailView, CurrentUser, DetailState, permissions};
use serde_json::json;

use common::{admin, harness};

#[tokio::test]
async fn mount_loads_company_with_details() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users/42")
                .query_param("includeDetails", "true");
            then.status(200).json_body(json!({
                "user": {"id": 42, "company_name": "Acme Tools", "gst_number": "22AAAAA0000A1Z5"}
            }));
        })
        .await;

    let h = harness(&server.url("/api"));
    let detail = CompanyDetailView::new(&h.gateway, admin(), 42);
    assert_eq!(detail.state(), DetailState::Loading);
    detail.mount().await.unwrap();

    let DetailState::Loaded(company) = detail.state() else {
        panic!("expected a loaded company");
    };
    assert_eq!(company.id, 42);
    assert_eq!(company.company_name.as_deref(), Some("Acme Tools"));
    assert!(detail.can_edit());
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_company_shows_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users/404");
            then.status(404).json_body(json!({"message": "User not found"}));
        })
        .await;

    let h = harness(&server.url("/api"));
    let detail = CompanyDetailView::new(&h.gateway, CurrentUser::new(2, 0, [permissions::COMPANY_VIEW]), 404);

    assert!(detail.mount().await.is_err());
    assert_eq!(detail.state(), DetailState::NotFound);
    assert!(!detail.can_edit());
}

#[tokio::test]
async fn reply_after_unmount_leaves_view_loading() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users/7");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(json!({"user": {"id": 7}}));
        })
        .await;

    let h = harness(&server.url("/api"));
    let detail = CompanyDetailView::new(&h.gateway, admin(), 7);
    let (result, ()) = tokio::join!(detail.mount(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        detail.unmount();
    });

    assert!(result.is_ok());
    assert_eq!(detail.state(), DetailState::Loading);
}
