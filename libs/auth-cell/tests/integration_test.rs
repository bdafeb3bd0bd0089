use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::models::{RegisterRequest, UpdateProfileRequest};
use auth_cell::services::auth::AuthService;
use auth_cell::session::SessionStore;
use shared_config::AppConfig;

fn test_config(base_url: &str, dir: &tempfile::TempDir) -> AppConfig {
    AppConfig {
        api_base_url: base_url.to_string(),
        session_file: dir.path().join("session.json"),
    }
}

fn profile_body() -> serde_json::Value {
    json!({
        "id": 42,
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567",
        "appointments": [
            {
                "id": 7,
                "doctor_id": 1,
                "appointment_time": "2024-03-05 10:00",
                "status": "scheduled",
                "notes": "Follow up"
            }
        ]
    })
}

#[tokio::test]
async fn login_stores_token_and_denormalized_user() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let config = test_config(&mock_server.uri(), &dir);

    Mock::given(method("POST"))
        .and(path("/api/patients/login"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/patients/profile"))
        .and(header("Authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&mock_server)
        .await;

    let service = AuthService::new(&config);
    let user = service.login("jane@example.com", "secret1").await.unwrap();

    assert_eq!(user.id, 42);
    assert_eq!(user.name, "Jane Doe");

    let session = SessionStore::new(&config).load().unwrap();
    assert_eq!(session.access_token, "token-abc");
    assert_eq!(session.user.email, "jane@example.com");
}

#[tokio::test]
async fn rejected_login_surfaces_server_message_and_stores_nothing() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let config = test_config(&mock_server.uri(), &dir);

    Mock::given(method("POST"))
        .and(path("/api/patients/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "Bad email or password"
        })))
        .mount(&mock_server)
        .await;

    let service = AuthService::new(&config);
    let err = service.login("jane@example.com", "wrong").await.unwrap_err();

    assert!(err.to_string().contains("Bad email or password"));
    assert!(SessionStore::new(&config).load().is_none());
}

#[tokio::test]
async fn invalid_registration_sends_no_request() {
    // No mock server: a dispatched request would fail loudly on connect.
    let dir = tempdir().unwrap();
    let config = test_config("http://127.0.0.1:1", &dir);

    let service = AuthService::new(&config);
    let err = service
        .register(RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "abc".to_string(),
            phone: "5551234567".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("at least 6 characters"));
}

#[tokio::test]
async fn register_posts_all_fields() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let config = test_config(&mock_server.uri(), &dir);

    Mock::given(method("POST"))
        .and(path("/api/patients/register"))
        .and(body_json(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "password": "secret1",
            "phone": "5551234567"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "msg": "Patient registered successfully"
        })))
        .mount(&mock_server)
        .await;

    let service = AuthService::new(&config);
    let msg = service
        .register(RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            phone: "5551234567".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(msg, "Patient registered successfully");
}

#[tokio::test]
async fn profile_update_requires_session_and_refreshes_stored_user() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let config = test_config(&mock_server.uri(), &dir);

    // Not logged in yet: the update is refused locally.
    let service = AuthService::new(&config);
    let request = UpdateProfileRequest {
        name: "Jane Smith".to_string(),
        email: "jane.smith@example.com".to_string(),
        phone: "5550000000".to_string(),
    };
    let err = service.update_profile(request.clone()).await.unwrap_err();
    assert!(err.to_string().contains("log in"));

    Mock::given(method("POST"))
        .and(path("/api/patients/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/patients/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/patients/profile"))
        .and(header("Authorization", "Bearer token-abc"))
        .and(body_json(json!({
            "name": "Jane Smith",
            "email": "jane.smith@example.com",
            "phone": "5550000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Patient information updated successfully"
        })))
        .mount(&mock_server)
        .await;

    service.login("jane@example.com", "secret1").await.unwrap();
    let msg = service.update_profile(request).await.unwrap();
    assert_eq!(msg, "Patient information updated successfully");

    let session = SessionStore::new(&config).load().unwrap();
    assert_eq!(session.user.name, "Jane Smith");
    assert_eq!(session.user.email, "jane.smith@example.com");
}

#[tokio::test]
async fn profile_decodes_appointments() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let config = test_config(&mock_server.uri(), &dir);

    Mock::given(method("POST"))
        .and(path("/api/patients/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/patients/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&mock_server)
        .await;

    let service = AuthService::new(&config);
    service.login("jane@example.com", "secret1").await.unwrap();

    let profile = service.profile().await.unwrap();
    assert_eq!(profile.appointments.len(), 1);
    assert_eq!(profile.appointments[0].id, 7);
    assert_eq!(profile.appointments[0].doctor_id, Some(1));
}
