use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use accountd::config::Config;
use accountd::store::memory::MemoryUserStore;

/// A running test server instance backed by an in-memory user store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Make an unauthenticated POST request with JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register a user, return the response body + status.
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> (Value, StatusCode) {
        self.post(
            "/register",
            &json!({
                "full_name": full_name,
                "email": email,
                "password": password,
                "password_confirm": password,
            }),
        )
        .await
    }

    /// Login and return the auth response body + status.
    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post("/login", &json!({ "email": email, "password": password }))
            .await
    }

    /// Request a password reset token for an email.
    pub async fn forgot_password(&self, email: &str) -> (Value, StatusCode) {
        self.post("/forgot-password", &json!({ "email": email })).await
    }

    /// Redeem a reset token with a new password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> (Value, StatusCode) {
        self.post(
            "/reset-password",
            &json!({
                "token": token,
                "new_password": new_password,
                "new_password_confirm": new_password,
            }),
        )
        .await
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with the default 600s reset token TTL.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_ttl(600).await
}

/// Spawn a test app with a custom reset token TTL, for expiry tests.
pub async fn spawn_app_with_ttl(reset_token_ttl: u64) -> TestApp {
    let config = Config {
        database_url: "postgres://unused-in-tests".to_string(),
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        reset_token_ttl,
        log_level: "warn".to_string(),
        smtp: None,
    };

    let store = Arc::new(MemoryUserStore::new());
    let (app, _state) = accountd::build_app(store, config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { addr, client }
}
