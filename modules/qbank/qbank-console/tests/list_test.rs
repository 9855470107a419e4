mod common;

use std::time::Duration;

use httpmock::prelude::*;
use qbank_console::{CompanyListView, CurrentUser, ViewError, permissions};
use serde_json::json;

use common::{CountingConfirm, admin, harness};

fn companies(ids: &[i64]) -> serde_json::Value {
    let users: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "company_name": format!("Company {id}"), "is_active": true}))
        .collect();
    json!({"users": users, "total": 23})
}

#[tokio::test]
async fn mount_restores_filters_and_mirrors_them_to_the_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users")
                .query_param("role", "company")
                .query_param("page", "3")
                .query_param("limit", "10")
                .query_param("search", "acme")
                .query_param("status", "active")
                .query_param("sortBy", "created_at")
                .query_param("sortOrder", "desc");
            then.status(200).json_body(companies(&[21, 22, 23]));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    list.mount("?search=acme&status=active&page=2").await.unwrap();

    let state = list.state();
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.total, 23);
    assert_eq!(state.total_pages(), 3);
    assert_eq!(state.url_query, "?search=acme&status=active&page=2");
    assert!(!state.loading && !state.refreshing);
    mock.assert_async().await;
}

#[tokio::test]
async fn search_resets_page_and_omits_status_all() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users").query_param("page", "4");
            then.status(200).json_body(companies(&[31]));
        })
        .await;
    let searched = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users")
                .query_param("page", "1")
                .query_param("search", "tools")
                .query_param_missing("status");
            then.status(200).json_body(companies(&[1, 2]));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    list.mount("page=3").await.unwrap();
    list.search("  tools ").await.unwrap();

    let state = list.state();
    assert_eq!(state.page, 0);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.search, "tools");
    assert_eq!(state.url_query, "?search=tools");
    searched.assert_async().await;
}

#[tokio::test]
async fn page_size_change_goes_back_to_first_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users")
                .query_param("page", "1")
                .query_param("limit", "25");
            then.status(200).json_body(companies(&[1]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users").query_param("limit", "10");
            then.status(200).json_body(companies(&[1]));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    list.mount("").await.unwrap();
    list.go_to_page(1).await.unwrap();
    list.set_page_size(25).await.unwrap();

    assert_eq!(list.state().page, 0);
    assert_eq!(list.state().page_size, 25);
    mock.assert_async().await;
}

#[tokio::test]
async fn without_view_permission_nothing_is_fetched() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(200).json_body(companies(&[1]));
        })
        .await;

    let h = harness(&server.url("/api"));
    let user = CurrentUser::new(5, 0, [permissions::COMPANY_EDIT]);
    let list = CompanyListView::new(&h.gateway, user, CountingConfirm::new(true));
    let err = list.mount("").await.unwrap_err();

    assert!(matches!(err, ViewError::AccessDenied("company_view")));
    assert!(list.can_edit());
    assert!(!list.can_delete());
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn failed_initial_fetch_is_kept_inline() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(500);
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    assert!(list.mount("").await.is_err());

    let state = list.state();
    assert!(state.error.is_some());
    assert!(state.items.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn toggle_patches_row_only_after_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(200).json_body(companies(&[7, 8]));
        })
        .await;
    let deactivate = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/api/user_management/users/7/status")
                .json_body(json!({"is_active": false}));
            then.status(200).json_body(json!({"message": "ok"}));
        })
        .await;
    let failing = server
        .mock_async(|when, then| {
            when.method(PATCH).path("/api/user_management/users/8/status");
            then.status(500);
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    list.mount("").await.unwrap();

    list.toggle_status(7).await.unwrap();
    assert!(list.toggle_status(8).await.is_err());

    let state = list.state();
    assert!(!state.items[0].is_active);
    assert!(state.items[1].is_active);
    deactivate.assert_hits_async(1).await;
    failing.assert_hits_async(1).await;
    assert!(
        h.notifier
            .messages()
            .contains(&"Company deactivated successfully".to_owned())
    );
}

#[tokio::test]
async fn delete_asks_first_then_refetches() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(200).json_body(companies(&[7]));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/user_management/users/7");
            then.status(200).json_body(json!({"message": "deleted"}));
        })
        .await;

    let h = harness(&server.url("/api"));

    let declined = CountingConfirm::new(false);
    let list = CompanyListView::new(&h.gateway, admin(), declined.clone());
    list.mount("").await.unwrap();
    assert!(!list.delete(7).await.unwrap());
    assert_eq!(declined.asked(), 1);
    delete.assert_hits_async(0).await;

    let accepted = CountingConfirm::new(true);
    let list = CompanyListView::new(&h.gateway, admin(), accepted.clone());
    list.mount("").await.unwrap();
    assert!(list.delete(7).await.unwrap());
    delete.assert_hits_async(1).await;
    // one mount per view plus the reload after the delete
    listing.assert_hits_async(3).await;
}

#[tokio::test]
async fn delete_is_reported_even_when_the_reload_fails() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(200).json_body(companies(&[7]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/user_management/users/7");
            then.status(200).json_body(json!({"message": "deleted"}));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    list.mount("").await.unwrap();

    listing.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(500);
        })
        .await;

    assert!(list.delete(7).await.unwrap());
    assert!(list.state().error.is_some());
    assert!(
        h.notifier
            .messages()
            .contains(&"Company deleted successfully".to_owned())
    );
}

#[tokio::test]
async fn huge_page_in_the_url_is_requested_without_overflow() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/users")
                .query_param("page", "4294967295");
            then.status(200).json_body(json!({"users": [], "total": 0}));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    list.mount("?page=4294967295").await.unwrap();

    assert_eq!(list.state().page, u32::MAX);
    assert!(list.state().items.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn response_arriving_after_unmount_is_dropped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(companies(&[1, 2]));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    let (result, ()) = tokio::join!(list.mount(""), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        list.unmount();
    });

    assert!(result.is_ok());
    assert!(list.state().items.is_empty());
    assert_eq!(list.state().url_query, "");
}

#[tokio::test]
async fn superseded_fetch_does_not_overwrite_newer_result() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users").query_param("search", "slow");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(companies(&[1, 2, 3]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users").query_param("search", "fast");
            then.status(200).json_body(companies(&[9]));
        })
        .await;

    let h = harness(&server.url("/api"));
    let list = CompanyListView::new(&h.gateway, admin(), CountingConfirm::new(true));
    let (slow, fast) = tokio::join!(list.search("slow"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        list.search("fast").await
    });

    assert!(slow.is_ok() && fast.is_ok());
    let state = list.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, 9);
    assert_eq!(state.search, "fast");
    assert_eq!(state.url_query, "?search=fast");
}
