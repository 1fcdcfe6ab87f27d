mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::factory::TEST_PASSWORD;
use common::{Factory, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": format!("test-{}@example.com", unique_id),
            "password": "password123",
            "name": "Ada",
            "surname": "Lovelace"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert!(body["user"]["id"].as_str().is_some());
    assert_eq!(
        body["user"]["email"].as_str().unwrap(),
        format!("test-{}@example.com", unique_id)
    );
    assert_eq!(body["user"]["surname"].as_str().unwrap(), "Lovelace");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": format!("  Test-{}@Example.COM ", unique_id),
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["user"]["email"].as_str().unwrap(),
        format!("test-{}@example.com", unique_id)
    );
    assert!(body["user"]["name"].is_null());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    // Create a user first
    let auth = factory.create_user().await;

    // Try to register with the same email
    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": auth.email.to_uppercase(),
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"].as_str().unwrap(), "conflict");
}

#[tokio::test]
async fn test_register_empty_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"].as_str().unwrap(), "validation_error");
}

#[tokio::test]
async fn test_register_missing_password() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": format!("test-{}@example.com", Uuid::new_v4())
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Password is required"));
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": format!("test-{}@example.com", unique_id),
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("at least 8 characters"));
}

#[tokio::test]
async fn test_register_name_too_long() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": format!("test-{}@example.com", Uuid::new_v4()),
            "password": "password123",
            "name": "x".repeat(51)
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();
    let email = format!("test-{}@example.com", unique_id);
    let password = "password123";

    // Register first
    app.server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": &email,
            "password": password
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // Then login
    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": &email,
            "password": password
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"].as_str().unwrap(), email);
}

#[tokio::test]
async fn test_login_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": format!("nobody-{}@example.com", Uuid::new_v4()),
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"].as_str().unwrap(), "invalid_credentials");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": auth.email,
            "password": "wrongpassword"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_factory_password() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": auth.email,
            "password": TEST_PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["user"]["id"].as_str().unwrap(),
        auth.user_id.to_string()
    );
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/api/v1/auth/me")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["email"].as_str().unwrap(), auth.email);
}

#[tokio::test]
async fn test_me_no_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"].as_str().unwrap(), "unauthorized");
}

#[tokio::test]
async fn test_me_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/v1/auth/me")
        .add_header("Authorization", "Bearer invalid-token")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"].as_str().unwrap(), "invalid_token");
}

#[tokio::test]
async fn test_update_me_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .patch("/api/v1/users/me")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Updated",
            "surname": "Person"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Updated");
    assert_eq!(body["surname"].as_str().unwrap(), "Person");
}

#[tokio::test]
async fn test_update_me_partial() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    // Update only name
    let response = app
        .server
        .patch("/api/v1/users/me")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "New Name"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "New Name");
    assert_eq!(body["surname"].as_str().unwrap(), "User");
}

#[tokio::test]
async fn test_update_me_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .server
        .patch("/api/v1/users/me")
        .json(&json!({
            "name": "Updated Name"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/health-check").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Success.");
}
