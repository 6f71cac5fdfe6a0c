use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::Secret;
use serde_json::json;

use tracker_service::config::{AuthConfig, ServerConfig, StoreBackend, StoreConfig, TrackerConfig};
use tracker_service::middleware::auth::Claims;
use tracker_service::startup::Application;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = TrackerConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                mongodb_uri: None,
                database: "tracker_test".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    /// Bearer token the app's auth extractor accepts.
    pub fn bearer_token(&self) -> String {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: "test-user".to_string(),
            email: Some("tester@example.com".to_string()),
            exp: (now + chrono::Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("Failed to encode test token")
    }

    pub async fn create_customer(&self, name: &str) -> serde_json::Value {
        let response = self
            .client
            .post(format!("{}/customers", self.address))
            .bearer_auth(self.bearer_token())
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn record_transaction(
        &self,
        customer_id: &str,
        body: serde_json::Value,
    ) -> reqwest::Response {
        self.client
            .post(format!(
                "{}/customers/{}/transactions",
                self.address, customer_id
            ))
            .bearer_auth(self.bearer_token())
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        let response = self
            .client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(self.bearer_token())
            .send()
            .await
            .expect("Failed to execute request");
        assert!(
            response.status().is_success(),
            "GET {} failed with {}",
            path,
            response.status()
        );
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn put_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(self.bearer_token())
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
