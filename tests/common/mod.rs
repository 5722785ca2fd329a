#![allow(dead_code)]

use chirpy::configuration::{JwtSettings, Platform};
use chirpy::startup::run;
use chirpy::store::MemoryStore;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub struct TestApp {
    pub address: String,
    pub store: MemoryStore,
    pub client: reqwest::Client,
}

pub struct LoggedInUser {
    pub id: String,
    pub token: String,
    pub refresh_token: String,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on(Platform::Dev).await
}

pub async fn spawn_app_on(platform: Platform) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = MemoryStore::new();
    let jwt_config = JwtSettings {
        secret: JWT_SECRET.to_string(),
    };
    let server = run(listener, Arc::new(store.clone()), jwt_config, platform)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(&format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_with_bearer(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn create_user(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json("/api/users", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json("/api/login", &json!({ "email": email, "password": password }))
            .await
    }

    /// Register and log in, panicking if either step fails.
    pub async fn logged_in_user(&self, email: &str, password: &str) -> LoggedInUser {
        assert_eq!(201, self.create_user(email, password).await.status().as_u16());

        let response = self.login(email, password).await;
        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.expect("Failed to parse response");

        LoggedInUser {
            id: body["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn create_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}/api/chirps", &self.address))
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
