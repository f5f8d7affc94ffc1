//! API tests against a live server on an ephemeral port

use crate::{
    get_json, listing_page, mount_page, numbered_books, spawn_api, test_config,
};
use serde_json::json;
use shelf_scraper::api::GREETING;
use shelf_scraper::config::DatabaseUrl;
use shelf_scraper::run_batch;
use shelf_scraper::storage::{BookStore, NewBook, Storage};
use tempfile::TempDir;
use wiremock::MockServer;

fn seed(dir: &TempDir, titles: &[&str]) -> DatabaseUrl {
    let database = DatabaseUrl::from_path(dir.path().join("books.db"));
    let books: Vec<NewBook> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| NewBook {
            title: title.to_string(),
            price: 10.0 + i as f64,
        })
        .collect();
    BookStore::open(&database)
        .unwrap()
        .replace_all(&books)
        .unwrap();
    database
}

#[tokio::test]
async fn test_welcome() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(seed(&dir, &[])).await;

    let (status, body) = get_json(&format!("{base}/")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"greeting": GREETING}));
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(seed(&dir, &[])).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_crawled_books_served_with_sequential_ids() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        listing_page(&numbered_books("Volume", 1, 20), Some("catalogue/page-2.html")),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        listing_page(&numbered_books("Volume", 21, 20), None),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, DatabaseUrl::from_path(dir.path().join("books.db")));
    run_batch(&config).await.unwrap();

    let base = spawn_api(config.database.clone()).await;
    let (status, body) = get_json(&format!("{base}/books")).await;
    assert_eq!(status, 200);

    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 40);
    for (i, book) in books.iter().enumerate() {
        assert_eq!(book["id"], json!(i + 1));
        assert_eq!(book["title"], json!(format!("Volume {}", i + 1)));
    }
    assert_eq!(books[0], json!({"id": 1, "title": "Volume 1", "price": 1.99}));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(seed(
        &dir,
        &["The Attic House", "Tipping the Velvet", "A Light in the Attic"],
    ))
    .await;

    let (status, body) = get_json(&format!("{base}/books/search?name=attic")).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([
            {"id": 1, "title": "The Attic House", "price": 10.0},
            {"id": 3, "title": "A Light in the Attic", "price": 12.0},
        ])
    );
}

#[tokio::test]
async fn test_search_without_matches_returns_message() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(seed(&dir, &["The Attic House"])).await;

    let (status, body) = get_json(&format!("{base}/books/search?name=zzz-nonexistent")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "no results"}));
}

#[tokio::test]
async fn test_search_requires_name() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(seed(&dir, &["The Attic House"])).await;

    let response = reqwest::get(format!("{base}/books/search")).await.unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_empty_table_lists_empty_array() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(seed(&dir, &[])).await;

    let (status, body) = get_json(&format!("{base}/books")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_unreachable_database_is_server_error() {
    let dir = TempDir::new().unwrap();
    let base = spawn_api(DatabaseUrl::from_path(dir.path().join("absent.db"))).await;

    let (status, body) = get_json(&format!("{base}/books")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "could not connect to the database"}));

    let (status, body) = get_json(&format!("{base}/books/search?name=x")).await;
    assert_eq!(status, 500);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_table_is_server_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other.db");
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (x INTEGER);")
        .unwrap();
    let base = spawn_api(DatabaseUrl::from_path(path)).await;

    let (status, body) = get_json(&format!("{base}/books")).await;
    assert_eq!(status, 500);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("error querying the database"));
}

#[tokio::test]
async fn test_reload_replaces_served_rows() {
    let dir = TempDir::new().unwrap();
    let database = seed(&dir, &["Old One", "Old Two", "Old Three"]);
    let base = spawn_api(database.clone()).await;

    BookStore::open(&database)
        .unwrap()
        .replace_all(&[NewBook {
            title: "Fresh".to_string(),
            price: 2.5,
        }])
        .unwrap();

    let (_, body) = get_json(&format!("{base}/books")).await;
    assert_eq!(body, json!([{"id": 1, "title": "Fresh", "price": 2.5}]));
}
