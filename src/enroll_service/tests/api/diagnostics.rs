use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn ping_confirms_liveness() {
    let app = spawn_app().await;

    let response = app.get("/ping").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Auth API working!");
}

#[tokio::test]
async fn db_status_reports_a_ready_store() {
    let app = spawn_app().await;
    app.provision("U1", "Ada Lovelace", Some("a@x.com")).await;
    app.provision("U2", "Grace Hopper", None).await;

    let response = app.get("/db-status").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "connected");
    assert_eq!(body["database"]["connected"], true);
    assert_eq!(body["database"]["tableExists"], true);
    assert_eq!(body["database"]["userCount"], 2);
    assert_eq!(body["database"]["sampleUsers"].as_array().unwrap().len(), 2);
    assert!(
        body["database"]["tableStructure"]
            .as_array()
            .unwrap()
            .iter()
            .any(|column| column["columnName"] == "otp_expires_at")
    );
    assert_eq!(body["recommendations"][0], "Database is ready");
}

#[tokio::test]
async fn db_status_recommends_provisioning_when_empty() {
    let app = spawn_app().await;

    let response = app.get("/db-status").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["database"]["userCount"], 0);
    assert_eq!(body["recommendations"][0], "Table exists but no users found");
}

#[tokio::test]
async fn test_email_reports_incomplete_configuration() {
    // The test environment carries no provider credentials, so the
    // self-check must name what is missing rather than attempt a send.
    let app = spawn_app().await;

    let response = app.get("/test-email").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email provider configuration incomplete");
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("BREVO_API_KEY")
    );
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn unknown_identity_error_body_is_stable() {
    let app = spawn_app().await;

    let response = app
        .post_json("/verify-otp", &json!({ "uniqueId": "U404", "otp": "123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User not found");
    assert!(body.get("detail").is_none());
}
