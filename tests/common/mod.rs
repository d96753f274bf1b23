#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use mentorhub_api_rust::auth::{generate_jwt, Claims};
use mentorhub_api_rust::config::{
    ApiConfig, AppConfig, CollectionsConfig, Environment, SecurityConfig, StoreBackend,
    StoreConfig,
};
use mentorhub_api_rust::server::{app, AppState};
use mentorhub_api_rust::store::MemoryStore;

pub const JWT_SECRET: &str = "integration-test-secret";

fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        api: ApiConfig { port: 0, enable_request_logging: false },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            connection_string: String::new(),
            db_name: "test".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
        },
        collections: CollectionsConfig {
            control: "Control".to_string(),
            create: "Create".to_string(),
            consume: "Consume".to_string(),
            event: "Event".to_string(),
            identity: "Identity".to_string(),
            organization: "Organization".to_string(),
            profile: "Profile".to_string(),
        },
    }
}

/// Router over a fresh in-memory store, plus the store handle for seeding
/// read-only domains directly.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(Arc::new(test_config()), store.clone());
    (app(state), store)
}

pub fn bearer(user_id: &str) -> String {
    let claims = Claims::new(user_id, vec!["staff".to_string()], 1);
    format!("Bearer {}", generate_jwt(&claims, JWT_SECRET).expect("mint test JWT"))
}

pub struct TestRequest<'a> {
    pub method: Method,
    pub uri: &'a str,
    pub auth: Option<String>,
    pub body: Option<Value>,
    pub headers: Vec<(&'a str, &'a str)>,
}

impl<'a> TestRequest<'a> {
    pub fn new(method: Method, uri: &'a str) -> Self {
        Self { method, uri, auth: Some(bearer("user-1")), body: None, headers: Vec::new() }
    }

    pub fn unauthenticated(mut self) -> Self {
        self.auth = None;
        self
    }

    pub fn auth(mut self, value: impl Into<String>) -> Self {
        self.auth = Some(value.into());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: &'a str, value: &'a str) -> Self {
        self.headers.push((name, value));
        self
    }

    /// Send against a clone of the router; returns status and parsed body.
    pub async fn send(self, app: &Router) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(auth) = &self.auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        for (name, value) in &self.headers {
            builder = builder.header(*name, *value);
        }

        let request = match self.body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        let response = app.clone().oneshot(request).await.expect("send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    TestRequest::new(Method::GET, uri).send(app).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    TestRequest::new(Method::POST, uri).json(body).send(app).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    TestRequest::new(Method::PATCH, uri).json(body).send(app).await
}
