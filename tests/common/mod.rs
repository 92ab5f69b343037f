#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use shop_api::{
    auth::TokenService,
    config::DatabaseConfig,
    database::{DatabaseManager, MemoryStore, PgStore, Store},
    AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";
/// bcrypt's minimum work factor keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// The real router over an in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub tokens: TokenService,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        let store = MemoryStore::new();
        let (router, tokens) = router_over(Arc::new(store.clone()))?;
        Ok(Self {
            router,
            store,
            tokens,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<TestResponse> {
        send(&self.router, method, uri, body, token).await
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<TestResponse> {
        self.post(
            "/api/user/register",
            json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TestResponse> {
        self.post("/api/user/login", json!({ "email": email, "password": password }))
            .await
    }

    /// Register and log in a fresh account, returning its token
    pub async fn signed_in(&self, email: &str) -> Result<String> {
        let res = self.register("Test Account", email, "12345678").await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "register failed: {}", res.body);

        let res = self.login(email, "12345678").await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.body);
        res.body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response carried no token")
    }
}

/// The real router and its token service over any store
pub fn router_over(store: Arc<dyn Store>) -> Result<(Router, TokenService)> {
    let tokens = TokenService::new(TEST_SECRET, Duration::hours(2))?;
    let state = AppState::new(store, tokens.clone(), TEST_BCRYPT_COST);
    Ok((shop_api::app(state), tokens))
}

/// `PgStore` on `DATABASE_URL` with the schema in place, or `None` when the
/// variable is unset so database-backed tests can skip.
pub async fn postgres_store() -> Result<Option<PgStore>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres-backed test");
        return Ok(None);
    };

    let config = DatabaseConfig {
        url,
        max_connections: 5,
        connection_timeout: 5,
    };
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::ensure_schema(&pool).await?;
    Ok(Some(PgStore::new(pool)))
}

/// Email nobody else in a shared database is using
pub fn unique_email(tag: &str) -> String {
    format!("{}-{}@doe.com", tag, uuid::Uuid::new_v4().simple())
}

/// Drive `router` with one request and decode the JSON body (`Null` when empty)
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("auth-token", token);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .context("router call failed")?;

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
    };

    Ok(TestResponse { status, headers, body })
}

pub fn sample_product() -> Value {
    json!({
        "name": "Rustic Wooden Chair",
        "description": "Sturdy and built to last.",
        "imageURL": "https://picsum.photos/500/500",
        "price": 129.99,
        "stock": 12,
        "isOnDiscount": false,
        "discountPct": 0,
        "isHidden": false
    })
}
