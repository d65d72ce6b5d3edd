//! API integration tests
//!
//! These run against a live server with an empty-ish database:
//! `cargo test --test api_tests -- --ignored`

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// ISBN that no bibliographic source knows about
const UNKNOWN_ISBN: &str = "0000000000000";

fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

/// Register a fresh account and return its bearer token
async fn register_and_login(client: &Client, prefix: &str) -> String {
    let username = unique_username(prefix);
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "username": username, "password": "correct-horse" }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "correct-horse" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn post_json(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get_json(client: &Client, token: &str, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn put_json(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn delete(client: &Client, token: &str, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn create_shelf(client: &Client, token: &str, name: &str) -> i64 {
    let (status, body) = post_json(client, token, "/bookshelves", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("bookshelf id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": unique_username("nobody"),
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_conflicts() {
    let client = Client::new();
    let username = unique_username("dup");
    let payload = json!({ "username": username, "password": "correct-horse" });

    let first = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "username": username.to_uppercase(), "password": "correct-horse" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_requests_rejected() {
    let client = Client::new();

    for path in ["/books", "/bookshelves", "/categories", "/series", "/users/me"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_cookie_authenticates_after_login() {
    let client = Client::builder().cookie_store(true).build().unwrap();
    let username = unique_username("cookie");

    client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "username": username, "password": "correct-horse" }))
        .send()
        .await
        .expect("Failed to send request");
    client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "correct-horse" }))
        .send()
        .await
        .expect("Failed to send request");

    let me = client
        .get(format!("{}/users/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(me.status(), StatusCode::OK);
    let body: Value = me.json().await.unwrap();
    assert_eq!(body["username"], username);
}

#[tokio::test]
#[ignore]
async fn test_other_users_records_are_invisible() {
    let client = Client::new();
    let alice = register_and_login(&client, "alice").await;
    let bob = register_and_login(&client, "bob").await;

    let shelf = create_shelf(&client, &alice, "Living room").await;
    let (status, category) = post_json(&client, &alice, "/categories", json!({ "name": "Fiction" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, series) = post_json(&client, &alice, "/series", json!({ "title": "Trilogy" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let category_path = format!("/categories/{}", category["id"]);
    let series_path = format!("/series/{}", series["id"]);
    let shelf_path = format!("/bookshelves/{}", shelf);

    for path in [&category_path, &series_path, &shelf_path] {
        let (status, _) = get_json(&client, &bob, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", path);
    }
    let (status, _) = put_json(&client, &bob, &category_path, json!({ "name": "Stolen" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = put_json(&client, &bob, &series_path, json!({ "title": "Stolen" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = put_json(&client, &bob, &shelf_path, json!({ "name": "Stolen" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(delete(&client, &bob, &category_path).await, StatusCode::NOT_FOUND);
    assert_eq!(delete(&client, &bob, &series_path).await, StatusCode::NOT_FOUND);
    assert_eq!(delete(&client, &bob, &shelf_path).await, StatusCode::NOT_FOUND);

    for path in ["/bookshelves", "/categories", "/series", "/books"] {
        let (status, listed) = get_json(&client, &bob, path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]), "GET {}", path);
    }

    let (_, category) = get_json(&client, &alice, &category_path).await;
    assert_eq!(category["name"], "Fiction");
}

#[tokio::test]
#[ignore]
async fn test_other_users_books_are_invisible() {
    let client = Client::new();
    let alice = register_and_login(&client, "alice").await;
    let bob = register_and_login(&client, "bob").await;

    let alices_shelf = create_shelf(&client, &alice, "Reading nook").await;
    let bobs_shelf = create_shelf(&client, &bob, "Desk").await;
    let (status, book) = post_json(
        &client,
        &alice,
        "/books",
        json!({ "isbn": UNKNOWN_ISBN, "bookshelf": alices_shelf, "volume_number": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_path = format!("/books/{}", book["id"]);

    let (status, body) = get_json(&client, &bob, &book_path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("google_data").is_none());
    assert!(body.get("isbn").is_none());

    let (status, _) = put_json(
        &client,
        &bob,
        &book_path,
        json!({ "isbn": UNKNOWN_ISBN, "bookshelf": bobs_shelf, "title": "Mine now" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(delete(&client, &bob, &book_path).await, StatusCode::NOT_FOUND);

    let (status, unchanged) = get_json(&client, &alice, &book_path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["title"], "Unknown Title");
    assert_eq!(unchanged["bookshelf"], alices_shelf);
    assert_eq!(unchanged["volume_number"], 3);
}

#[tokio::test]
#[ignore]
async fn test_book_requires_own_bookshelf() {
    let client = Client::new();
    let alice = register_and_login(&client, "alice").await;
    let bob = register_and_login(&client, "bob").await;
    let alices_shelf = create_shelf(&client, &alice, "Study").await;

    let (status, body) = post_json(&client, &bob, "/books", json!({ "isbn": UNKNOWN_ISBN })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["bookshelf"].is_array());

    let (status, body) = post_json(
        &client,
        &bob,
        "/books",
        json!({ "isbn": UNKNOWN_ISBN, "bookshelf": alices_shelf }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["bookshelf"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unknown_isbn_stored_with_placeholders() {
    let client = Client::new();
    let token = register_and_login(&client, "reader").await;
    let shelf = create_shelf(&client, &token, "Hallway").await;

    let (status, book) = post_json(
        &client,
        &token,
        "/books",
        json!({ "isbn": UNKNOWN_ISBN, "bookshelf": shelf, "volume_number": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["title"], "Unknown Title");
    assert_eq!(book["author"], "Unknown Author");
    assert_eq!(book["bookshelf"], shelf);
    assert_eq!(book["bookshelf_name"], "Hallway");

    let (status, detail) = get_json(&client, &token, &format!("/books/{}", book["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["isbn"], UNKNOWN_ISBN);
    assert_eq!(detail["volume_number"], 2);
    assert!(detail["google_data"].is_null());

    let (status, _) = get_json(&client, &token, &format!("/books/search?isbn={}", UNKNOWN_ISBN)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_deleting_category_and_series_detaches_books() {
    let client = Client::new();
    let token = register_and_login(&client, "curator").await;
    let shelf = create_shelf(&client, &token, "Attic").await;
    let (_, category) = post_json(&client, &token, "/categories", json!({ "name": "Poetry" })).await;
    let (_, series) = post_json(&client, &token, "/series", json!({ "title": "Collected" })).await;

    let (status, book) = post_json(
        &client,
        &token,
        "/books",
        json!({
            "isbn": UNKNOWN_ISBN,
            "bookshelf": shelf,
            "category": category["id"],
            "series": series["id"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["category_name"], "Poetry");
    assert_eq!(book["series_title"], "Collected");

    assert_eq!(delete(&client, &token, &format!("/categories/{}", category["id"])).await, StatusCode::NO_CONTENT);
    assert_eq!(delete(&client, &token, &format!("/series/{}", series["id"])).await, StatusCode::NO_CONTENT);

    let (status, book) = get_json(&client, &token, &format!("/books/{}", book["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(book["category"].is_null());
    assert!(book["series"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_deleting_bookshelf_removes_its_books() {
    let client = Client::new();
    let token = register_and_login(&client, "mover").await;
    let doomed = create_shelf(&client, &token, "Boxes").await;
    let kept = create_shelf(&client, &token, "Shelf").await;

    let (_, gone) = post_json(&client, &token, "/books", json!({ "isbn": UNKNOWN_ISBN, "bookshelf": doomed })).await;
    let (_, stays) = post_json(&client, &token, "/books", json!({ "isbn": UNKNOWN_ISBN, "bookshelf": kept })).await;

    assert_eq!(delete(&client, &token, &format!("/bookshelves/{}", doomed)).await, StatusCode::NO_CONTENT);

    let (status, _) = get_json(&client, &token, &format!("/books/{}", gone["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, books) = get_json(&client, &token, "/books").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&Value> = books.as_array().unwrap().iter().map(|b| &b["id"]).collect();
    assert_eq!(ids, vec![&stays["id"]]);
}

#[tokio::test]
#[ignore]
async fn test_list_filters_by_bookshelf() {
    let client = Client::new();
    let token = register_and_login(&client, "sorter").await;
    let first = create_shelf(&client, &token, "One").await;
    let second = create_shelf(&client, &token, "Two").await;

    post_json(&client, &token, "/books", json!({ "isbn": UNKNOWN_ISBN, "bookshelf": first })).await;
    post_json(&client, &token, "/books", json!({ "isbn": UNKNOWN_ISBN, "bookshelf": second })).await;

    let (status, books) = get_json(&client, &token, &format!("/books?bookshelf={}", second)).await;
    assert_eq!(status, StatusCode::OK);
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["bookshelf"], second);
}

#[tokio::test]
#[ignore]
async fn test_update_overrides_title_and_moves_book() {
    let client = Client::new();
    let token = register_and_login(&client, "editor").await;
    let from = create_shelf(&client, &token, "From").await;
    let to = create_shelf(&client, &token, "To").await;
    let (_, book) = post_json(&client, &token, "/books", json!({ "isbn": UNKNOWN_ISBN, "bookshelf": from })).await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book["id"]))
        .bearer_auth(&token)
        .json(&json!({ "isbn": UNKNOWN_ISBN, "bookshelf": to, "title": "Handwritten notes" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["title"], "Handwritten notes");
    assert_eq!(updated["author"], "Unknown Author");
    assert_eq!(updated["bookshelf"], to);
}

#[tokio::test]
#[ignore]
async fn test_malformed_book_payload_is_field_error() {
    let client = Client::new();
    let token = register_and_login(&client, "sloppy").await;

    let (status, body) = post_json(&client, &token, "/books", json!({ "bookshelf": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["isbn"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_verify_and_refresh_token() {
    let client = Client::new();
    let token = register_and_login(&client, "session").await;

    let (status, verified) = post_json(&client, &token, "/auth/verify", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["valid"], true);

    let (status, refreshed) = post_json(&client, &token, "/auth/refresh", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let new_token = refreshed["token"].as_str().unwrap();

    let (status, me) = get_json(&client, new_token, "/users/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], verified["user_id"]);
}
