//! Catalog backend contract
//!
//! The trait the core consumes. The HTTP implementation lives in
//! `modules::integrations::catalog_api`.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::DomainError;

/// Remote catalog operations needed by the search session and detail view
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Raw search entries, in server order
    async fn search_catalog(&self, query: &str) -> Result<Vec<Value>, DomainError>;

    /// Detail payloads keyed by uppercased id
    async fn fetch_book_detail(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Value>, DomainError>;

    /// Direct download URLs, in server order
    async fn fetch_download_links(&self, id: &str) -> Result<Vec<String>, DomainError>;

    /// Presigned download URL for an admin-uploaded book
    async fn fetch_admin_presigned_download(&self, book_id: &str) -> Result<String, DomainError>;

    /// Whether the image at `url` can be loaded
    async fn probe_image(&self, url: &str) -> bool;
}
