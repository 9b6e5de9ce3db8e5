//! End-to-end tests for the auth HTTP surface, run against the real
//! router with an in-memory user store and a capturing mailer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use askhub_api::AppState;
use askhub_api::app::build_app;
use askhub_auth::{AccountManager, PasswordHasher};
use askhub_core::config::app::{CorsConfig, ServerConfig};
use askhub_core::config::auth::AuthConfig;
use askhub_core::config::logging::LoggingConfig;
use askhub_core::config::mail::MailConfig;
use askhub_core::config::{AppConfig, DatabaseConfig};
use askhub_core::error::AppError;
use askhub_core::result::AppResult;
use askhub_core::traits::Mailer;
use askhub_entity::user::{NewUser, User, UserRole, UserStore};

#[derive(Debug, Default)]
struct MemStore {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserStore for MemStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_reset_hash(
        &self,
        reset_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| {
                u.password_reset_token_hash.as_deref() == Some(reset_hash)
                    && u.password_reset_expires.is_some_and(|exp| exp >= now)
            })
            .cloned())
    }

    async fn create(&self, new: NewUser) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            role: new.role,
            password_hash: new.password_hash,
            password_changed_at: None,
            password_reset_token_hash: None,
            password_reset_expires: None,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_reset_credential(
        &self,
        id: Uuid,
        reset_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("no such user"))?;
        user.password_reset_token_hash = Some(reset_hash.to_string());
        user.password_reset_expires = Some(expires_at);
        Ok(())
    }

    async fn clear_reset_credential(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("no such user"))?;
        user.password_reset_token_hash = None;
        user.password_reset_expires = None;
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("no such user"))?;
        user.password_hash = password_hash.to_string();
        user.password_changed_at = Some(changed_at);
        user.password_reset_token_hash = None;
        user.password_reset_expires = None;
        Ok(())
    }
}

/// Mailer that records the reset URLs it was asked to deliver.
#[derive(Debug, Default)]
struct CapturingMailer {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_password_reset(
        &self,
        _recipient_name: &str,
        _email: &str,
        reset_url: &str,
        _valid_minutes: i64,
    ) -> AppResult<()> {
        self.sent.lock().unwrap().push(reset_url.to_string());
        Ok(())
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            shutdown_grace_seconds: 1,
            cors: CorsConfig {
                allowed_origins: vec!["*".into()],
            },
        },
        database: DatabaseConfig {
            url: "postgres://unused".into(),
            max_connections: 1,
            connect_timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_ttl_days: 90,
            cookie_ttl_days: 90,
            cookie_secure: false,
            reset_token_ttl_minutes: 10,
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        },
        mail: MailConfig {
            provider: "log".into(),
            relay_url: String::new(),
            from_address: "noreply@askhub.local".into(),
            reset_url_base: "http://localhost:8080/api/auth/reset-password".into(),
            timeout_seconds: 1,
        },
        logging: LoggingConfig::default(),
    }
}

struct TestApp {
    router: Router,
    store: Arc<MemStore>,
    mailer: Arc<CapturingMailer>,
    hasher: PasswordHasher,
}

impl TestApp {
    fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemStore::default());
        let mailer = Arc::new(CapturingMailer::default());
        let hasher = PasswordHasher::new(&config.auth).unwrap();

        let accounts = Arc::new(
            AccountManager::new(
                Arc::clone(&store) as Arc<dyn UserStore>,
                Arc::clone(&mailer) as Arc<dyn Mailer>,
                config.auth.clone(),
                config.mail.clone(),
            )
            .unwrap(),
        );

        let state = AppState {
            config: Arc::new(config),
            accounts,
            users: Arc::clone(&store) as Arc<dyn UserStore>,
        };

        Self {
            router: build_app(state),
            store,
            mailer,
            hasher,
        }
    }

    /// Seed a user directly into the store.
    async fn seed_user(&self, name: &str, email: &str, password: &str, role: UserRole) -> User {
        let hash = self.hasher.hash_password(password).unwrap();
        self.store
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash,
                role,
            })
            .await
            .unwrap()
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value, Vec<String>) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body, cookies)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body, _) = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_signup_logs_in_and_sets_cookie() {
    let app = TestApp::new();

    let (status, body, cookies) = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Ada",
                "email": "Ada@Example.com",
                "password": "correct-horse",
            })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert!(body["token"].as_str().is_some());
    // Email is normalized and credential material never serialized.
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
    assert!(body["data"]["user"].get("password_hash").is_none());
    assert!(cookies.iter().any(|c| c.starts_with("jwt=")));
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let app = TestApp::new();

    let (status, body, _) = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Bad",
                "email": "not-an-email",
                "password": "correct-horse",
            })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_malformed_body_maps_to_400() {
    let app = TestApp::new();

    // Missing field: same error envelope as every other caller mistake.
    let (status, body, _) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].as_str().is_some());

    // Non-JSON body too.
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let app = TestApp::new();
    app.seed_user("Ada", "ada@example.com", "correct-horse", UserRole::User)
        .await;

    let (status, body, _) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "wrong" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Incorrect email or password!");
}

#[tokio::test]
async fn test_protected_route_without_token_is_401() {
    let app = TestApp::new();

    let (status, body, _) = app
        .request(
            "PATCH",
            "/api/auth/update-password",
            Some(json!({ "password_current": "a", "password": "brand-new-pass" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "You are not logged in! Please log in to get access."
    );
}

#[tokio::test]
async fn test_auth_state_probe_never_errors() {
    let app = TestApp::new();
    app.seed_user("Ada", "ada@example.com", "correct-horse", UserRole::User)
        .await;

    // Anonymous: 200, not logged in.
    let (status, body, _) = app.request("GET", "/api/auth/state", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_login"], false);

    // Garbage token: still 200.
    let (status, body, _) = app
        .request("GET", "/api/auth/state", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_login"], false);
    assert!(body["message"].as_str().is_some());

    // Real session: logged in.
    let token = app.login("ada@example.com", "correct-horse").await;
    let (status, body, _) = app
        .request("GET", "/api/auth/state", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_login"], true);
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_logout_overwrites_cookie_with_sentinel() {
    let app = TestApp::new();

    let (status, body, cookies) = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(cookies.iter().any(|c| c.starts_with("jwt=loggedout")));
}

#[tokio::test]
async fn test_admin_route_rejects_plain_user() {
    let app = TestApp::new();
    let user = app
        .seed_user("Ada", "ada@example.com", "correct-horse", UserRole::User)
        .await;
    let token = app.login("ada@example.com", "correct-horse").await;

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/admin/users/{}", user.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action."
    );
}

#[tokio::test]
async fn test_admin_route_allows_admin() {
    let app = TestApp::new();
    let user = app
        .seed_user("Ada", "ada@example.com", "correct-horse", UserRole::User)
        .await;
    app.seed_user("Root", "root@example.com", "admin-pass", UserRole::Admin)
        .await;
    let token = app.login("root@example.com", "admin-pass").await;

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/admin/users/{}", user.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/admin/users/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No user found with that ID");
}

#[tokio::test]
async fn test_forgot_password_unknown_email_is_404() {
    let app = TestApp::new();

    let (status, body, _) = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": "ghost@example.com" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_full_password_reset_flow() {
    let app = TestApp::new();
    app.seed_user("Ada", "ada@example.com", "old-password", UserRole::User)
        .await;

    let (status, body, _) = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": "ada@example.com" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Token sent to email");

    // The raw token only ever travels in the mailed URL.
    let reset_url = app.mailer.sent.lock().unwrap().last().unwrap().clone();
    let raw_token = reset_url.rsplit('/').next().unwrap().to_string();

    let (status, body, cookies) = app
        .request(
            "PATCH",
            &format!("/api/auth/reset-password/{raw_token}"),
            Some(json!({ "password": "brand-new-pass" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert!(cookies.iter().any(|c| c.starts_with("jwt=")));

    // Token is single-use.
    let (status, _, _) = app
        .request(
            "PATCH",
            &format!("/api/auth/reset-password/{raw_token}"),
            Some(json!({ "password": "another-pass" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Old password is gone, new one works.
    let (status, _, _) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "old-password" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    app.login("ada@example.com", "brand-new-pass").await;
}

#[tokio::test]
async fn test_update_password_rotates_session() {
    let app = TestApp::new();
    app.seed_user("Ada", "ada@example.com", "old-password", UserRole::User)
        .await;
    let token = app.login("ada@example.com", "old-password").await;

    // Wrong current password.
    let (status, body, _) = app
        .request(
            "PATCH",
            "/api/auth/update-password",
            Some(json!({ "password_current": "nope", "password": "brand-new-pass" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Your current password is wrong");

    let (status, body, _) = app
        .request(
            "PATCH",
            "/api/auth/update-password",
            Some(json!({ "password_current": "old-password", "password": "brand-new-pass" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["token"].as_str().unwrap().to_string();

    // The fresh token authenticates.
    let (status, body, _) = app
        .request("GET", "/api/auth/state", None, Some(&fresh))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_login"], true);
}

#[tokio::test]
async fn test_external_signup_is_idempotent() {
    let app = TestApp::new();

    let (status, _, _) = app
        .request(
            "POST",
            "/api/auth/oauth",
            Some(json!({ "name": "Ada", "email": "ada@example.com" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body, _) = app
        .request(
            "POST",
            "/api/auth/oauth",
            Some(json!({ "name": "Ada", "email": "ada@example.com" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
}
