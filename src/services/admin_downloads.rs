//! Presigned downloads for admin-uploaded books.
//!
//! Only the admin surface uses this; the catalog views never call it.

use crate::domain::CatalogApi;

/// Presigned URL for `book_id`, or `None` when the backend cannot provide one.
pub async fn presigned_download_url(api: &dyn CatalogApi, book_id: &str) -> Option<String> {
    match api.fetch_admin_presigned_download(book_id).await {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Presigned download for {} not found: {}", book_id, e);
            None
        }
    }
}
