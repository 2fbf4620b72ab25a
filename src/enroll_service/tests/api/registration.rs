use chrono::Utc;
use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn full_registration_flow_succeeds() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;

    // Step 1: confirm the identity and its delivery target
    let response = app.post_json("/check-user", &json!({ "uniqueId": "U1" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User found");
    assert_eq!(body["email"], "a@x.com");

    // Step 2: request a code
    let response = app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "OTP sent successfully");
    assert_eq!(body["email"], "a@x.com");

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "a@x.com");
    assert_eq!(sent[0].subject, "OTP Verification");
    let otp = app.last_sent_otp().await;

    let stored = app.identity_store.get("U1").await.unwrap();
    assert_eq!(stored.otp_code().unwrap().as_str(), otp);
    let until_expiry = stored.otp_expires_at().unwrap() - Utc::now();
    assert!(until_expiry.num_seconds() > 290 && until_expiry.num_seconds() <= 300);

    // Step 3: prove control of the mailbox
    let response = app
        .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": otp }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "OTP verified successfully");

    // Step 4: bind a password
    let response = app
        .post_json(
            "/set-password",
            &json!({ "uniqueId": "U1", "password": "pw123" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Password created successfully, registration complete"
    );

    let stored = app.identity_store.get("U1").await.unwrap();
    assert!(stored.is_registered());
    assert!(stored.password_digest().is_some());
    assert!(stored.otp_code().is_none());
    assert!(stored.otp_expires_at().is_none());

    // Registration is terminal: the gate now rejects the identity
    let response = app.post_json("/check-user", &json!({ "uniqueId": "U1" })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User already registered");
}

#[tokio::test]
async fn check_user_returns_404_for_unknown_identity() {
    let app = spawn_app().await;

    let response = app
        .post_json("/check-user", &json!({ "uniqueId": "U404" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn send_otp_returns_404_and_sends_nothing_for_unknown_identity() {
    let app = spawn_app().await;

    let response = app
        .post_json("/send-otp", &json!({ "uniqueId": "U404" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn send_otp_requires_a_contact_address() {
    let app = spawn_app().await;
    app.provision("U2", "No Contact", None).await;

    let response = app.post_json("/send-otp", &json!({ "uniqueId": "U2" })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User email not found");
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn send_otp_delivery_failure_is_retryable() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;

    app.email_client.set_failing(true);
    let response = app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send OTP");

    // The undelivered code stays persisted
    let stored = app.identity_store.get("U1").await.unwrap();
    let undelivered = stored.otp_code().unwrap().clone();

    // The retry issues and delivers a fresh code
    app.email_client.set_failing(false);
    let response = app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;
    assert_eq!(response.status().as_u16(), 200);

    let delivered = app.last_sent_otp().await;
    let stored = app.identity_store.get("U1").await.unwrap();
    assert_eq!(stored.otp_code().unwrap().as_str(), delivered);
    // Overwritten in place; at most one live code per record.
    assert_ne!(stored.otp_code(), Some(&undelivered));
}

#[tokio::test]
async fn reissued_code_invalidates_the_previous_one() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;

    app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;
    let first = app.last_sent_otp().await;

    app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;
    let second = app.last_sent_otp().await;

    if first != second {
        let response = app
            .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": first }))
            .await;
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid OTP");
    }

    let response = app
        .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": second }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn verify_otp_rejects_a_wrong_code() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;

    let issued = app.last_sent_otp().await;
    let wrong = if issued == "000000" { "111111" } else { "000000" };

    let response = app
        .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": wrong }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid OTP");
}

#[tokio::test]
async fn verify_otp_rejects_a_malformed_code() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;

    for malformed in ["12345", "1234567", "12 456", "abcdef"] {
        let response = app
            .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": malformed }))
            .await;
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid OTP");
    }
}

#[tokio::test]
async fn verify_otp_rejects_an_expired_code() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;

    let otp = app.last_sent_otp().await;
    app.expire_current_otp("U1").await;

    let response = app
        .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": otp }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "OTP expired");
}

#[tokio::test]
async fn verify_otp_is_non_destructive() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    app.post_json("/send-otp", &json!({ "uniqueId": "U1" })).await;
    let otp = app.last_sent_otp().await;

    for _ in 0..2 {
        let response = app
            .post_json("/verify-otp", &json!({ "uniqueId": "U1", "otp": &otp }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }
}

#[tokio::test]
async fn set_password_returns_404_for_unknown_identity() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/set-password",
            &json!({ "uniqueId": "U404", "password": "pw123" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn set_password_does_not_require_a_prior_verification() {
    // The step only checks that the record exists; the prior verify-otp
    // call is trusted to have gated the client.
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;

    let response = app
        .post_json(
            "/set-password",
            &json!({ "uniqueId": "U1", "password": "pw123" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(app.identity_store.get("U1").await.unwrap().is_registered());
}
