//! API integration tests
//!
//! Each test drives the full router against its own in-memory database.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use library_catalog::{
    config::AppConfig,
    create_router,
    repository::{self, Repository},
    services::Services,
    AppState,
};

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }
}

/// Helper to build the app on a fresh in-memory database
async fn test_app() -> Router {
    // A single connection that never expires keeps the in-memory database alive
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    repository::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    create_router(AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Repository::new(pool))),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec();

    Reply {
        status,
        location,
        body,
    }
}

async fn create_author(app: &Router, first: &str, last: &str) -> i64 {
    let reply = send(
        app,
        Method::POST,
        "/authors",
        Some(json!({ "first_name": first, "last_name": last })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.json()["id"].as_i64().expect("No author ID")
}

async fn create_book(app: &Router, title: &str, year: i64, author_id: i64) -> i64 {
    let reply = send(
        app,
        Method::POST,
        "/books",
        Some(json!({ "title": title, "year": year, "author_id": author_id })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.text());
    reply.json()["id"].as_i64().expect("No book ID")
}

async fn create_copy(app: &Router, book_id: i64) -> i64 {
    let reply = send(app, Method::POST, "/copies", Some(json!({ "book_id": book_id }))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.json()["id"].as_i64().expect("No copy ID")
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let reply = send(&app, Method::GET, "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["status"], "healthy");

    let reply = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["status"], "ready");
}

#[tokio::test]
async fn test_create_and_get_author() {
    let app = test_app().await;

    let reply = send(
        &app,
        Method::POST,
        "/authors",
        Some(json!({ "first_name": "Stanisław", "last_name": "Lem" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let created = reply.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(reply.location, Some(format!("/authors/{}", id)));

    let reply = send(&app, Method::GET, &format!("/authors/{}", id), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), created);
    assert_eq!(reply.json()["first_name"], "Stanisław");
    assert_eq!(reply.json()["last_name"], "Lem");
}

#[tokio::test]
async fn test_author_blank_first_name_rejected() {
    let app = test_app().await;

    for last_name in ["Lem", ""] {
        let reply = send(
            &app,
            Method::POST,
            "/authors",
            Some(json!({ "first_name": "   ", "last_name": last_name })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.text(), "First name cannot be empty.");
    }

    let reply = send(&app, Method::GET, "/authors", None).await;
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn test_author_blank_last_name_rejected() {
    let app = test_app().await;

    let reply = send(
        &app,
        Method::POST,
        "/authors",
        Some(json!({ "first_name": "Olga" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Last name cannot be empty.");
}

#[tokio::test]
async fn test_update_and_delete_author() {
    let app = test_app().await;
    let id = create_author(&app, "Olga", "Tokarczuk").await;
    let uri = format!("/authors/{}", id);

    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "first_name": "Olga", "last_name": "Nawoja Tokarczuk" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.json()["last_name"], "Nawoja Tokarczuk");

    let reply = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_author_not_found() {
    let app = test_app().await;

    let reply = send(
        &app,
        Method::PUT,
        "/authors/42",
        Some(json!({ "first_name": "A", "last_name": "B" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let app = test_app().await;
    let author = create_author(&app, "Andrzej", "Sapkowski").await;
    let book = create_book(&app, "Ostatnie życzenie", 1993, author).await;

    let reply = send(&app, Method::DELETE, &format!("/authors/{}", author), None).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let reply = send(&app, Method::GET, &format!("/authors/{}", author), None).await;
    assert_eq!(reply.status, StatusCode::OK);

    send(&app, Method::DELETE, &format!("/books/{}", book), None).await;
    let reply = send(&app, Method::DELETE, &format!("/authors/{}", author), None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_out_of_range_ids_are_not_found() {
    let app = test_app().await;

    for uri in ["/authors/1e20", "/books/1e20", "/authors/-1e20", "/books/inf"] {
        let reply = send(&app, Method::GET, uri, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{}", uri);
    }

    let reply = send(&app, Method::DELETE, "/books/1e20", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(
        &app,
        Method::PUT,
        "/authors/1e20",
        Some(json!({ "first_name": "", "last_name": "" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wide_id_accepts_float_notation() {
    let app = test_app().await;
    let id = create_author(&app, "Wisława", "Szymborska").await;

    let reply = send(&app, Method::GET, &format!("/authors/{}.0", id), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["id"], id);
}

#[tokio::test]
async fn test_copy_id_must_be_integer() {
    let app = test_app().await;

    let reply = send(&app, Method::GET, "/copies/1e20", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = send(&app, Method::GET, "/copies/5", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_embeds_author() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;

    let reply = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": "Solaris", "year": 1961, "authorId": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let book = reply.json();
    let id = book["id"].as_i64().unwrap();
    assert_eq!(reply.location, Some(format!("/books/{}", id)));
    assert_eq!(book["title"], "Solaris");
    assert_eq!(book["year"], 1961);
    assert_eq!(book["author"]["id"], author);
    assert_eq!(book["author"]["first_name"], "Stanisław");

    let reply = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(reply.json(), book);
}

#[tokio::test]
async fn test_create_book_unknown_author_rejected() {
    let app = test_app().await;

    let reply = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": "Ghost", "year": 2000, "author_id": 9999 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Author with the specified AuthorId does not exist.");
}

#[tokio::test]
async fn test_book_year_bounds() {
    let app = test_app().await;
    let author = create_author(&app, "Anonymous", "Scribe").await;

    let reply = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": "Future", "year": -1, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Year cannot be negative.");

    let reply = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": "Epoch", "year": 0, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.json()["year"], 0);
}

#[tokio::test]
async fn test_book_blank_title_rejected() {
    let app = test_app().await;
    let author = create_author(&app, "Anonymous", "Scribe").await;

    let reply = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": " ", "year": 10, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Title cannot be empty.");
}

#[tokio::test]
async fn test_list_books_filtered_by_author() {
    let app = test_app().await;
    let lem = create_author(&app, "Stanisław", "Lem").await;
    let mrozek = create_author(&app, "Sławomir", "Mrożek").await;

    let solaris = create_book(&app, "Solaris", 1961, lem).await;
    create_book(&app, "Tango", 1964, mrozek).await;
    let eden = create_book(&app, "Eden", 1959, lem).await;

    let reply = send(&app, Method::GET, &format!("/books?authorId={}", lem), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let books = reply.json();
    let ids: Vec<i64> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![solaris, eden]);
    assert!(books
        .as_array()
        .unwrap()
        .iter()
        .all(|book| book["author"]["id"] == lem));

    let reply = send(&app, Method::GET, "/books", None).await;
    assert_eq!(reply.json().as_array().unwrap().len(), 3);

    let reply = send(&app, Method::GET, "/books?authorId=9999", None).await;
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn test_update_book_unknown_author_leaves_book_unchanged() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;
    let uri = format!("/books/{}", book);

    let before = send(&app, Method::GET, &uri, None).await.json();

    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "Solaris II", "year": 1962, "author_id": 9999 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Author with the specified AuthorId does not exist.");

    let after = send(&app, Method::GET, &uri, None).await.json();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_book_moves_to_other_author() {
    let app = test_app().await;
    let lem = create_author(&app, "Stanisław", "Lem").await;
    let other = create_author(&app, "Janusz", "Zajdel").await;
    let book = create_book(&app, "Limes inferior", 1982, lem).await;
    let uri = format!("/books/{}", book);

    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "Limes inferior", "year": 1982, "author_id": other })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.json()["author"]["last_name"], "Zajdel");
}

#[tokio::test]
async fn test_delete_book_cascades_to_copies() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;
    let kept_book = create_book(&app, "Eden", 1959, author).await;

    let first = create_copy(&app, book).await;
    let second = create_copy(&app, book).await;
    let kept = create_copy(&app, kept_book).await;

    let reply = send(&app, Method::DELETE, &format!("/books/{}", book), None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    for copy in [first, second] {
        let reply = send(&app, Method::GET, &format!("/copies/{}", copy), None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    let reply = send(&app, Method::GET, &format!("/copies/{}", kept), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["book_id"], kept_book);
}

#[tokio::test]
async fn test_copy_lifecycle() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;
    let other_book = create_book(&app, "Eden", 1959, author).await;

    let reply = send(&app, Method::POST, "/copies", Some(json!({ "bookId": book }))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let copy = reply.json()["id"].as_i64().unwrap();
    assert_eq!(reply.location, Some(format!("/copies/{}", copy)));

    let uri = format!("/copies/{}", copy);
    let reply = send(&app, Method::PUT, &uri, Some(json!({ "book_id": other_book }))).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.json(), json!({ "id": copy, "book_id": other_book }));

    let reply = send(&app, Method::GET, "/copies", None).await;
    assert_eq!(reply.json().as_array().unwrap().len(), 1);

    let reply = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_copy_unknown_book_rejected() {
    let app = test_app().await;

    let reply = send(&app, Method::POST, "/copies", Some(json!({ "book_id": 77 }))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Book with the specified BookId does not exist.");

    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;
    let copy = create_copy(&app, book).await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/copies/{}", copy),
        Some(json!({ "book_id": 77 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = send(&app, Method::GET, &format!("/copies/{}", copy), None).await;
    assert_eq!(reply.json()["book_id"], book);
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let app = test_app().await;
    let first = create_author(&app, "A", "One").await;
    send(&app, Method::DELETE, &format!("/authors/{}", first), None).await;

    let second = create_author(&app, "B", "Two").await;
    assert!(second > first);
}

#[tokio::test]
async fn test_null_field_is_bad_request() {
    let app = test_app().await;

    let reply = send(
        &app,
        Method::POST,
        "/authors",
        Some(json!({ "first_name": null, "last_name": "Lem" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.text().contains("first_name"), "{}", reply.text());

    let reply = send(&app, Method::GET, "/authors", None).await;
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn test_wrongly_typed_fields_are_bad_request() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;

    for body in [
        json!({ "title": "Solaris", "year": "1961", "author_id": author }),
        json!({ "title": "Solaris", "year": 1961, "author_id": 1e10 }),
        json!({ "title": 42, "year": 1961, "author_id": author }),
    ] {
        let reply = send(&app, Method::POST, "/books", Some(body.clone())).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{}", body);
    }

    let reply = send(&app, Method::POST, "/copies", Some(json!({ "book_id": "one" }))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = send(&app, Method::GET, "/books", None).await;
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn test_body_without_json_content_type_is_bad_request() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/authors")
        .body(Body::from(r#"{"first_name": "Stanisław", "last_name": "Lem"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let reply = send(&app, Method::GET, "/authors", None).await;
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn test_update_author_blank_first_name_rejected() {
    let app = test_app().await;
    let id = create_author(&app, "Bruno", "Schulz").await;
    let uri = format!("/authors/{}", id);

    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "first_name": "  ", "last_name": "Schulz" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "First name cannot be empty.");

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.json()["first_name"], "Bruno");
}

#[tokio::test]
async fn test_update_book_blank_title_rejected() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/books/{}", book),
        Some(json!({ "title": "", "year": 1961, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Title cannot be empty.");
}

#[tokio::test]
async fn test_update_book_negative_year_rejected() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;
    let uri = format!("/books/{}", book);

    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "Solaris", "year": -1, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), "Year cannot be negative.");

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.json()["year"], 1961);
}

#[tokio::test]
async fn test_update_missing_book_not_found() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;

    let reply = send(
        &app,
        Method::PUT,
        "/books/42",
        Some(json!({ "title": "Golem XIV", "year": 1981, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_copy_not_found() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    let book = create_book(&app, "Solaris", 1961, author).await;

    let reply = send(&app, Method::PUT, "/copies/42", Some(json!({ "book_id": book }))).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_book_writes_are_not_found() {
    let app = test_app().await;
    let author = create_author(&app, "Stanisław", "Lem").await;
    create_book(&app, "Solaris", 1961, author).await;

    let reply = send(
        &app,
        Method::PUT,
        "/books/1e20",
        Some(json!({ "title": "Solaris", "year": 1961, "author_id": author })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, Method::DELETE, "/books/-1e20", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, Method::GET, "/books", None).await;
    assert_eq!(reply.json().as_array().unwrap().len(), 1);
}
