//! Live API tests against a running server
//!
//! Start the server (`RUN_MODE=development cargo run`) and run with
//! `cargo test --test live_api -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:8080";
const BASE_URL: &str = "http://localhost:8080/api";

/// Unique suffix so repeated runs do not collide on emails
fn unique() -> String {
    format!("{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

/// Register a fresh user and return its token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "username": "live tester",
            "email": format!("live{}@mail.com", unique()),
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert!(response.status().is_success());
    response
        .headers()
        .get("x-auth")
        .and_then(|v| v.to_str().ok())
        .expect("No token in response")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", SERVER_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", SERVER_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let email = format!("login{}@mail.com", unique());

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "username": "live tester", "email": email, "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/auth", BASE_URL))
        .json(&json!({ "email": email, "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    assert!(response.headers().get("x-auth").is_some());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email);
    assert!(body.get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth", BASE_URL))
        .json(&json!({
            "email": "nobody-here@mail.com",
            "password": "wrong password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/users/me", BASE_URL))
        .header("x-auth", token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "live tester");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/borrowers", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

/// Create a category, a book with `stock` copies and a borrower
async fn seed_lending(client: &Client, token: &str, stock: i32) -> (Value, Value) {
    let category: Value = client
        .post(format!("{}/categories", BASE_URL))
        .header("x-auth", token)
        .json(&json!({ "name": "Fiction Books" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let book: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("x-auth", token)
        .json(&json!({
            "title": "Dune Part One",
            "categoryId": category["_id"],
            "stock": stock,
            "failedReturnFee": 50
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let borrower: Value = client
        .post(format!("{}/borrowers", BASE_URL))
        .header("x-auth", token)
        .json(&json!({
            "firstName": "first",
            "lastName": "last",
            "age": 30,
            "gender": "female",
            "email": format!("borrower{}@mail.com", unique()),
            "address": "12 Long Street",
            "phone": "123-12-12"
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    (book, borrower)
}

async fn borrow(client: &Client, token: &str, book: &Value, borrower: &Value) -> (u16, Value) {
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .header("x-auth", token)
        .json(&json!({ "borrowerId": borrower["_id"], "bookId": book["_id"] }))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn give_back(client: &Client, token: &str, borrow_id: &Value) -> (u16, Value) {
    let response = client
        .post(format!("{}/returns", BASE_URL))
        .header("x-auth", token)
        .json(&json!({ "borrowId": borrow_id }))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn stock_of(client: &Client, book: &Value) -> i64 {
    let body: Value = client
        .get(format!("{}/books/{}", BASE_URL, book["_id"].as_str().unwrap()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body["stock"].as_i64().expect("No stock in response")
}

#[tokio::test]
#[ignore]
async fn test_lending_cycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let (book, borrower) = seed_lending(&client, &token, 1).await;

    let (status, borrow) = borrow(&client, &token, &book, &borrower).await;
    assert_eq!(status, 200);
    assert_eq!(stock_of(&client, &book).await, 0);

    let (status, returned) = give_back(&client, &token, &borrow["_id"]).await;
    assert_eq!(status, 200);
    assert_eq!(returned["penaltyFee"], 0.0);
    assert!(returned["dateReturned"].is_string());
    assert_eq!(stock_of(&client, &book).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_borrow_out_of_stock() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let (book, borrower) = seed_lending(&client, &token, 0).await;

    let (status, body) = borrow(&client, &token, &book, &borrower).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Book not in stock");
    assert_eq!(stock_of(&client, &book).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_double_return() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let (book, borrower) = seed_lending(&client, &token, 1).await;

    let (_, borrow) = borrow(&client, &token, &book, &borrower).await;
    let (status, _) = give_back(&client, &token, &borrow["_id"]).await;
    assert_eq!(status, 200);

    let (status, body) = give_back(&client, &token, &borrow["_id"]).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "return already processed");
    assert_eq!(stock_of(&client, &book).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_of_last_copy() {
    const CONCURRENT_BORROWS: usize = 20;

    let client = Client::new();
    let token = get_auth_token(&client).await;
    let (book, borrower) = seed_lending(&client, &token, 1).await;

    let mut set = tokio::task::JoinSet::new();
    for _ in 0..CONCURRENT_BORROWS {
        let client = client.clone();
        let token = token.clone();
        let book = book.clone();
        let borrower = borrower.clone();
        set.spawn(async move { borrow(&client, &token, &book, &borrower).await });
    }

    let mut succeeded = 0;
    let mut out_of_stock = 0;
    while let Some(result) = set.join_next().await {
        let (status, body) = result.expect("Borrow task panicked");
        match status {
            200 => succeeded += 1,
            400 => {
                assert_eq!(body["error"], "Book not in stock");
                out_of_stock += 1;
            }
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(out_of_stock, CONCURRENT_BORROWS - 1);
    assert_eq!(stock_of(&client, &book).await, 0);
}
