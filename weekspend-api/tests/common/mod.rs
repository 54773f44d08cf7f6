/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - A router wired with a known test PIN
/// - Request/response helpers

use axum::body::Body;
use axum::http::{header, Request, Response};
use sqlx::PgPool;
use tower::Service as _;
use weekspend_api::app::{build_router, AppState};
use weekspend_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};

/// PIN the test router accepts
pub const TEST_PIN: &str = "483920";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context against the database in `DATABASE_URL`
    pub async fn new() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let db = PgPool::connect(&database_url).await?;

        // Migrations path is relative to this crate's Cargo.toml
        sqlx::migrate!("../weekspend-shared/migrations")
            .run(&db)
            .await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                production: false,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            auth: AuthConfig {
                pin: TEST_PIN.to_string(),
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(TestContext { db, app })
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .call(request)
            .await
            .expect("router is infallible")
    }

    /// Signs in with the test PIN and returns the session cookie pair
    pub async fn sign_in(&self) -> String {
        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/v1/auth/sign-in")
                    .header("content-type", "application/json")
                    .body(Body::from(format!(r#"{{"pin":"{}"}}"#, TEST_PIN)))
                    .unwrap(),
            )
            .await;

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("sign-in sets a session cookie")
            .to_str()
            .unwrap();

        // Keep only the name=value pair for the Cookie request header
        set_cookie
            .split(';')
            .next()
            .expect("cookie has a name=value pair")
            .to_string()
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE session, transactions, presets, budget")
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
