mod common;

use httpmock::prelude::*;
use qbank_gateway::{
    GatewayError, MSG_FORBIDDEN, MSG_GENERIC, MSG_NOT_FOUND, MSG_SERVER_ERROR,
    MSG_SESSION_EXPIRED, MSG_UNREACHABLE, MSG_VALIDATION, Request, StatusCode,
};
use serde_json::json;

use common::harness;

#[tokio::test]
async fn bearer_token_is_attached_when_present() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/questions")
                .header("Authorization", "Bearer session-token");
            then.status(200).json_body(json!({"questions": [], "total": 0}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("session-token"));
    let response = h
        .gateway
        .execute(Request::get("/questions").build().unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn no_authorization_header_without_credential() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/authentication/login")
                .header_missing("Authorization");
            then.status(200).json_body(json!({"token": "fresh"}));
        })
        .await;

    let h = harness(&server.url("/api"), None);
    h.gateway
        .execute(Request::post("/authentication/login").build().unwrap())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_clears_credential_and_navigates_once() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user_management/users");
            then.status(401).json_body(json!({"error": "jwt expired"}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("stale"));
    let err = h
        .gateway
        .execute(Request::get("/user_management/users").build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Unauthenticated));
    assert!(h.gateway.session().credential().is_none());
    assert_eq!(h.navigator.login_redirects(), 1);
    assert_eq!(h.notifier.messages(), [MSG_SESSION_EXPIRED]);
}

#[tokio::test]
async fn classified_statuses_notify_exactly_once() {
    let server = MockServer::start_async().await;
    for (path, status) in [("/api/forbidden", 403), ("/api/missing", 404), ("/api/boom", 500)] {
        server
            .mock_async(move |when, then| {
                when.path(path);
                then.status(status).body("<html>error</html>");
            })
            .await;
    }

    let cases = [
        ("/forbidden", MSG_FORBIDDEN),
        ("/missing", MSG_NOT_FOUND),
        ("/boom", MSG_SERVER_ERROR),
    ];
    for (path, expected) in cases {
        let h = harness(&server.url("/api"), Some("t"));
        let result = h.gateway.execute(Request::get(path).build().unwrap()).await;

        assert!(result.is_err(), "{path} should reject");
        assert_eq!(h.notifier.messages(), [expected], "{path}");
        assert_eq!(h.navigator.login_redirects(), 0);
        assert!(h.gateway.session().is_authenticated());
    }
}

#[tokio::test]
async fn validation_errors_produce_one_notice_each() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/users");
            then.status(422).json_body(json!({
                "errors": [
                    {"param": "email", "msg": "Email already registered"},
                    {"param": "gst_number", "msg": "Invalid GST number"},
                    {"param": "pincode", "msg": "Pincode must be 6 digits"}
                ]
            }));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let err = h
        .gateway
        .execute(Request::post("/users").json(&json!({})).unwrap().build().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.field_errors().len(), 3);
    assert_eq!(
        h.notifier.messages(),
        ["Email already registered", "Invalid GST number", "Pincode must be 6 digits"]
    );
}

#[tokio::test]
async fn validation_without_details_uses_generic_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/api/users");
            then.status(422).json_body(json!({"message": "invalid"}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let err = h
        .gateway
        .execute(Request::put("/users").build().unwrap())
        .await
        .unwrap_err();

    assert!(err.field_errors().is_empty());
    assert_eq!(h.notifier.messages(), [MSG_VALIDATION]);
}

#[tokio::test]
async fn other_client_errors_surface_backend_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/api/conflict");
            then.status(409)
                .json_body(json!({"error": "This email or mobile number is already in use"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/api/bad");
            then.status(400).body("");
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let conflict = h
        .gateway
        .execute(Request::get("/conflict").build().unwrap())
        .await
        .unwrap_err();
    let bad = h.gateway.execute(Request::get("/bad").build().unwrap()).await.unwrap_err();

    assert_eq!(conflict.status(), Some(StatusCode::CONFLICT));
    assert_eq!(bad.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        h.notifier.messages(),
        ["This email or mobile number is already in use", MSG_GENERIC]
    );
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Nothing listens on port 1.
    let h = harness("http://127.0.0.1:1/api", Some("t"));
    let err = h
        .gateway
        .execute(Request::get("/questions").build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::NetworkUnreachable(_)));
    assert_eq!(h.notifier.messages(), [MSG_UNREACHABLE]);
    assert!(h.gateway.session().is_authenticated());
}

#[tokio::test]
async fn tolerant_policy_resolves_client_errors_silently() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/api/questions/99");
            then.status(404).json_body(json!({"message": "Question not found"}));
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let response = h
        .gateway
        .execute(
            Request::get("/questions/99")
                .tolerate_client_errors()
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn tolerant_policy_still_rejects_server_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/api/questions");
            then.status(503);
        })
        .await;

    let h = harness(&server.url("/api"), Some("t"));
    let err = h
        .gateway
        .execute(Request::get("/questions").tolerate_client_errors().build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Server { .. }));
    assert_eq!(h.notifier.messages(), [MSG_SERVER_ERROR]);
}
