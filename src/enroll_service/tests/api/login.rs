use chrono::Utc;
use enroll_adapters::auth::decode_session_token;
use enroll_core::SESSION_TTL_SECONDS;
use serde_json::json;

use crate::helpers::{TEST_JWT_SECRET, TestApp, spawn_app};

/// Drive the whole registration protocol over HTTP.
async fn register(app: &TestApp, unique_id: &str, password: &str) {
    let response = app
        .post_json("/send-otp", &json!({ "uniqueId": unique_id }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let otp = app.last_sent_otp().await;
    let response = app
        .post_json("/verify-otp", &json!({ "uniqueId": unique_id, "otp": otp }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .post_json(
            "/set-password",
            &json!({ "uniqueId": unique_id, "password": password }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn login_returns_a_bearer_token_with_the_identity_claims() {
    let app = spawn_app().await;
    let id = app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    register(&app, "U1", "pw123").await;

    let before = Utc::now().timestamp() as usize;
    let response = app
        .post_json("/login", &json!({ "uniqueId": "U1", "password": "pw123" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["uniqueId"], "U1");
    assert_eq!(body["user"]["fullName"], "Ada Lovelace");

    let token = body["token"].as_str().unwrap();
    let claims = decode_session_token(token, TEST_JWT_SECRET.as_bytes()).unwrap();
    assert_eq!(claims.id, id);
    assert_eq!(claims.unique_id, "U1");

    // Fixed two-hour validity
    let after = Utc::now().timestamp() as usize;
    assert!(claims.exp >= before + SESSION_TTL_SECONDS as usize);
    assert!(claims.exp <= after + SESSION_TTL_SECONDS as usize);
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    register(&app, "U1", "pw123").await;

    let response = app
        .post_json("/login", &json!({ "uniqueId": "U1", "password": "wrongpw" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn login_rejects_an_identity_that_never_registered() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;

    let response = app
        .post_json("/login", &json!({ "uniqueId": "U1", "password": "pw123" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn login_returns_404_for_unknown_identity() {
    let app = spawn_app().await;

    let response = app
        .post_json("/login", &json!({ "uniqueId": "U404", "password": "pw123" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn login_rejects_an_empty_password() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    register(&app, "U1", "pw123").await;

    let response = app
        .post_json("/login", &json!({ "uniqueId": "U1", "password": "" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
