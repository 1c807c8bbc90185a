//! Integration tests for the authentication flow.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp, TestResponse};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app.register("alice", PASSWORD).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "User registered successfully");
    assert_eq!(response.data()["username"], "alice");
    assert!(response.data().get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.register("alice", PASSWORD).await;

    let response = app.register("alice", PASSWORD).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error(), "CONFLICT");
    assert_eq!(response.message(), "Username already exists");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();

    let response = app.register("alice", "short").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "Password must be at least 8 characters long."
    );
}

#[tokio::test]
async fn test_register_rejects_long_username() {
    let app = TestApp::new();

    let response = app.register(&"u".repeat(31), PASSWORD).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Username must not exceed 30 characters.");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("alice", PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Login successful");
    assert!(response.data()["accessToken"].is_string());
    assert!(response.data()["refreshToken"].is_string());
    assert_eq!(response.data()["user"]["username"], "alice");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.register("alice", PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid credentials");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Username is required.");
}

#[tokio::test]
async fn test_login_is_rate_limited() {
    let app = TestApp::new();
    let attempts = app.config.rate_limit.login_max_attempts;
    let body = json!({ "username": "nobody", "password": PASSWORD });

    for _ in 0..attempts {
        let response = app
            .request("POST", "/api/auth/login", Some(body.clone()), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let response = app
        .request("POST", "/api/auth/login", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.error(), "RATE_LIMITED");
    assert_eq!(
        response.message(),
        "Too many login attempts. Please try again after 15 minutes."
    );
}

#[tokio::test]
async fn test_rotating_forwarded_for_does_not_reset_limit() {
    let app = TestApp::new();
    let attempts = app.config.rate_limit.login_max_attempts;
    let body = json!({ "username": "nobody", "password": PASSWORD });

    let mut limited = 0;
    for i in 0..attempts + 5 {
        let client = format!("198.51.100.{i}");
        let response = app
            .request_with_headers(
                "POST",
                "/api/auth/login",
                Some(body.clone()),
                None,
                &[("x-forwarded-for", client.as_str())],
            )
            .await;
        if response.status == StatusCode::TOO_MANY_REQUESTS {
            limited += 1;
        }
    }

    assert_eq!(limited, 5);
}

#[tokio::test]
async fn test_trusted_forwarded_for_limits_each_client() {
    let app = TestApp::with_config(|config| config.rate_limit.trust_forwarded_for = true);
    let attempts = app.config.rate_limit.login_max_attempts;

    for _ in 0..attempts {
        let response = login_from(&app, "198.51.100.1").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    let response = login_from(&app, "198.51.100.1").await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);

    let response = login_from(&app, "198.51.100.2").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

async fn login_from(app: &TestApp, client: &str) -> TestResponse {
    app.request_with_headers(
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "nobody", "password": PASSWORD })),
        None,
        &[("x-forwarded-for", client)],
    )
    .await
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"], "alice");
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new();
    app.register("alice", PASSWORD).await;
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": PASSWORD })),
            None,
        )
        .await;
    let refresh_token = login.data()["refreshToken"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.data()["accessToken"].as_str().unwrap().to_string();

    let me = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "Logged out successfully");
}
