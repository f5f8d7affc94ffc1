//! Batch job tests: crawl the mock catalogue, then load the table

use crate::{listing_page, mount_page, numbered_books, test_config};
use shelf_scraper::config::{load_config_from, load_database_url_from, DatabaseUrl};
use shelf_scraper::storage::{BookStore, NewBook, Storage};
use shelf_scraper::{run_batch, ConfigError, HarvestError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_database(dir: &TempDir) -> DatabaseUrl {
    DatabaseUrl::from_path(dir.path().join("books.db"))
}

#[tokio::test]
async fn test_two_pages_load_forty_rows_in_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        listing_page(&numbered_books("Book", 1, 20), Some("catalogue/page-2.html")),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        listing_page(&numbered_books("Book", 21, 20), None),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, temp_database(&dir));

    let written = run_batch(&config).await.unwrap();
    assert_eq!(written, 40);

    let store = BookStore::open(&config.database).unwrap();
    let books = store.list_all().unwrap();
    assert_eq!(books.len(), 40);
    for (i, book) in books.iter().enumerate() {
        let n = i + 1;
        assert_eq!(book.id, n as i64);
        assert_eq!(book.title, format!("Book {n}"));
        assert_eq!(book.price, format!("{n}.99").parse::<f64>().unwrap());
    }
}

#[tokio::test]
async fn test_price_with_pound_sign() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        listing_page(
            &[("A Light in the Attic".to_string(), "£51.77".to_string())],
            None,
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, temp_database(&dir));
    run_batch(&config).await.unwrap();

    let books = BookStore::open(&config.database).unwrap().list_all().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "A Light in the Attic");
    assert_eq!(books[0].price, 51.77);
}

#[tokio::test]
async fn test_rerun_against_unchanged_source_is_idempotent() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        listing_page(&numbered_books("Stable", 1, 5), None),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, temp_database(&dir));

    run_batch(&config).await.unwrap();
    let first = BookStore::open(&config.database).unwrap().list_all().unwrap();

    run_batch(&config).await.unwrap();
    let second = BookStore::open(&config.database).unwrap().list_all().unwrap();

    assert_eq!(first, second);
    assert_eq!(second.len(), 5);
}

#[tokio::test]
async fn test_fetch_failure_on_page_two_keeps_previous_data() {
    let dir = TempDir::new().unwrap();
    let database = temp_database(&dir);

    // Data from an earlier successful run
    let previous = vec![
        NewBook {
            title: "Earlier Run".to_string(),
            price: 9.5,
        },
        NewBook {
            title: "Also Earlier".to_string(),
            price: 3.25,
        },
    ];
    BookStore::open(&database)
        .unwrap()
        .replace_all(&previous)
        .unwrap();

    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        listing_page(&numbered_books("New", 1, 20), Some("catalogue/page-2.html")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    // Never reached
    Mock::given(method("GET"))
        .and(path("/catalogue/page-3.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, database.clone());
    let result = run_batch(&config).await;
    assert!(matches!(result, Err(HarvestError::Crawl(_))));

    let books = BookStore::open(&database).unwrap().list_all().unwrap();
    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Earlier Run", "Also Earlier"]);
}

#[tokio::test]
async fn test_malformed_card_aborts_without_writing() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><article class="product_pod"><h3><a title="No price">x</a></h3></article></body></html>"#
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, temp_database(&dir));

    assert!(run_batch(&config).await.is_err());
    // The crawl failed before the store was ever opened
    assert!(!config.database.path().exists());
}

#[tokio::test]
async fn test_empty_listing_truncates_table() {
    let dir = TempDir::new().unwrap();
    let database = temp_database(&dir);
    BookStore::open(&database)
        .unwrap()
        .replace_all(&[NewBook {
            title: "Stale".to_string(),
            price: 1.0,
        }])
        .unwrap();

    let server = MockServer::start().await;
    mount_page(&server, "/", listing_page(&[], None)).await;

    let config = test_config(&server, database.clone());
    assert_eq!(run_batch(&config).await.unwrap(), 0);
    assert_eq!(BookStore::open(&database).unwrap().count_books().unwrap(), 0);
}

#[test]
fn test_missing_database_url_fails_both_binaries() {
    assert!(matches!(
        load_config_from(|_| None),
        Err(ConfigError::MissingVar("DATABASE_URL"))
    ));
    assert!(matches!(
        load_database_url_from(|_| None),
        Err(ConfigError::MissingVar("DATABASE_URL"))
    ));
}

#[test]
fn test_database_url_without_path_fails_both_binaries() {
    let lookup = |key: &str| (key == "DATABASE_URL").then(|| "sqlite://".to_string());
    assert!(matches!(
        load_config_from(lookup),
        Err(ConfigError::Validation(_))
    ));
    assert!(matches!(
        load_database_url_from(lookup),
        Err(ConfigError::Validation(_))
    ));
}
