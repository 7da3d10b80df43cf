//! Shared helpers for the in-process HTTP tests.
//!
//! Every test builds its own router over a fresh in-memory store and drives
//! it with `oneshot`, so no database or open port is needed.

// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;

use serde_json::{json, Value};
use tower::ServiceExt;

use libris_server::{
    api::create_router, repository::Repository, services::Services, AppConfig, AppState,
};

pub const AUTH_HEADER: &str = "x-auth";

/// Number of borrows raced against a single copy
pub const CONCURRENT_BORROWS: usize = 20;

pub struct TestApp {
    pub router: Router,
    pub repository: Repository,
    pub services: Arc<Services>,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Repository::memory();
        let state = AppState::new(AppConfig::default(), repository.clone());
        Self {
            services: state.services.clone(),
            router: create_router(state),
            repository,
        }
    }

    /// Send one request and decode the JSON answer (`Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        send(self.router.clone(), method, uri, token, body).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(Method::GET, uri, token, None).await;
        (status, body)
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.send(Method::POST, uri, token, Some(body)).await;
        (status, body)
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.send(Method::PUT, uri, token, Some(body)).await;
        (status, body)
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(Method::DELETE, uri, token, None).await;
        (status, body)
    }

    /// Register a user and return the token issued for it
    pub async fn register(&self, email: &str) -> String {
        let (status, headers, _) = self
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "username": "test user", "email": email, "password": "password" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        headers
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("token header")
            .to_string()
    }

    /// Token for a freshly registered default user
    pub async fn token(&self) -> String {
        self.register("librarian@mail.com").await
    }

    pub async fn create_category(&self, token: &str, name: &str) -> Value {
        let (status, body) = self
            .post("/api/categories", Some(token), json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    pub async fn create_book(&self, token: &str, category_id: &Value, stock: i32, fee: f64) -> Value {
        let (status, body) = self
            .post(
                "/api/books",
                Some(token),
                json!({
                    "title": "Dune Part One",
                    "categoryId": category_id,
                    "stock": stock,
                    "failedReturnFee": fee
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    pub async fn create_borrower(&self, token: &str) -> Value {
        let (status, body) = self
            .post("/api/borrowers", Some(token), borrower_body("test@mail.com"))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

pub fn borrower_body(email: &str) -> Value {
    json!({
        "firstName": "first",
        "lastName": "last",
        "age": 30,
        "gender": "female",
        "email": email,
        "address": "12 Long Street",
        "phone": "123-12-12"
    })
}

/// Send a request through a router clone
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTH_HEADER, token);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, headers, body)
}
