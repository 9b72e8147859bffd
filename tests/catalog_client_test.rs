use knowledge_hub::catalog_api::HttpCatalogClient;
use knowledge_hub::config::Config;
use knowledge_hub::domain::{CatalogApi, DomainError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper to build a client pointing at the mock server
fn client_for(server: &MockServer) -> HttpCatalogClient {
    let config = Config {
        api_url: format!("{}/api/", server.uri()),
        ..Default::default()
    };
    HttpCatalogClient::new(&config).expect("Failed to build client")
}

#[tokio::test]
async fn test_search_returns_raw_entries_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "jack london"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "books": [
                { "id": "B2", "title": "White Fang" },
                { "id": "A1", "title": "Martin Eden" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let books = client_for(&mock_server)
        .search_catalog("jack london")
        .await
        .expect("search should succeed");

    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "White Fang");
    assert_eq!(books[1]["id"], "A1");
}

#[tokio::test]
async fn test_search_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "upstream down"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .search_catalog("x")
        .await
        .expect_err("500 must fail");
    assert!(matches!(err, DomainError::Status(500)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_search_shape_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "books": "not a list"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .search_catalog("x")
        .await
        .expect_err("non-array books must fail");
    assert!(matches!(err, DomainError::ShapeMismatch(_)));
}

#[tokio::test]
async fn test_fetch_book_detail_unwraps_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/book-detail"))
        .and(body_json(serde_json::json!({
            "book_ids": ["ABC123"],
            "address": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "book": {
                    "ABC123": { "book": { "title": "Detail Title", "ipfs_cid": "bafy" } },
                    "BROKEN": { "meta": {} }
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let details = client_for(&mock_server)
        .fetch_book_detail(&["ABC123".to_string()])
        .await
        .expect("detail should succeed");

    assert_eq!(details.len(), 1);
    assert_eq!(details["ABC123"]["title"], "Detail Title");
}

#[tokio::test]
async fn test_fetch_book_detail_missing_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/book-detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_book_detail(&["X".to_string()])
        .await
        .expect_err("missing data.book must fail");
    assert!(matches!(err, DomainError::ShapeMismatch(_)));
}

#[tokio::test]
async fn test_fetch_download_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/download"))
        .and(query_param("md5", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "links": ["https://dl.example/1", 42, "https://dl.example/2"]
        })))
        .mount(&mock_server)
        .await;

    let links = client_for(&mock_server)
        .fetch_download_links("abc123")
        .await
        .expect("links should succeed");

    assert_eq!(links, vec!["https://dl.example/1", "https://dl.example/2"]);
}

#[tokio::test]
async fn test_fetch_admin_presigned_download() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/download"))
        .and(query_param("bookId", "65f0c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "downloadUrl": "https://r2.example/file.pdf?sig=1"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/download"))
        .and(query_param("bookId", "missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Book not found"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = client
        .fetch_admin_presigned_download("65f0c1")
        .await
        .expect("presign should succeed");
    assert_eq!(url, "https://r2.example/file.pdf?sig=1");

    let err = client
        .fetch_admin_presigned_download("missing")
        .await
        .expect_err("404 must fail");
    assert!(matches!(err, DomainError::Status(404)));

    let url = knowledge_hub::services::admin_downloads::presigned_download_url(&client, "missing")
        .await;
    assert!(url.is_none());
}

#[tokio::test]
async fn test_probe_image() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/covers/ok.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(
        client
            .probe_image(&format!("{}/covers/ok.jpg", mock_server.uri()))
            .await
    );
    assert!(
        !client
            .probe_image(&format!("{}/covers/missing.jpg", mock_server.uri()))
            .await
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let config = Config {
        api_url: "http://127.0.0.1:9/api".to_string(),
        ..Default::default()
    };
    let client = HttpCatalogClient::new(&config).expect("Failed to build client");

    let err = client
        .fetch_download_links("abc")
        .await
        .expect_err("closed port must fail");
    assert!(err.is_transport());
}
