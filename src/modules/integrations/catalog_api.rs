//! HTTP client for the catalog backend.
//!
//! The backend fronts three upstream sources: the searchable catalog (merged
//! with admin uploads), the detail node keyed by uppercase content hash, and
//! the download-link service.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::domain::{CatalogApi, DomainError};
use crate::infrastructure::config::Config;

#[derive(Debug, Deserialize)]
struct DownloadLinksResponse {
    links: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct AdminDownloadResponse {
    #[serde(rename = "downloadUrl")]
    download_url: Option<String>,
}

#[derive(Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read_json(resp: reqwest::Response) -> Result<Value, DomainError> {
        if !resp.status().is_success() {
            return Err(DomainError::Status(resp.status().as_u16()));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to read response body: {}", e)))?;
        serde_json::from_str(&body)
            .map_err(|e| DomainError::ShapeMismatch(format!("Failed to parse JSON: {}", e)))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn search_catalog(&self, query: &str) -> Result<Vec<Value>, DomainError> {
        let resp = self
            .client
            .get(self.url("search"))
            .query(&[("query", query)])
            .send()
            .await?;

        let mut root = Self::read_json(resp).await?;
        match root.get_mut("books").map(Value::take) {
            Some(Value::Array(books)) => Ok(books),
            _ => Err(DomainError::ShapeMismatch("missing `books` array".to_string())),
        }
    }

    async fn fetch_book_detail(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Value>, DomainError> {
        let resp = self
            .client
            .post(self.url("book-detail"))
            .json(&json!({ "book_ids": ids, "address": "" }))
            .send()
            .await?;

        let mut root = Self::read_json(resp).await?;
        let books = match root.pointer_mut("/data/book").map(Value::take) {
            Some(Value::Object(books)) => books,
            _ => {
                return Err(DomainError::ShapeMismatch(
                    "missing `data.book` object".to_string(),
                ));
            }
        };

        // Each entry wraps its fields in a nested `book` object
        Ok(books
            .into_iter()
            .filter_map(|(key, mut entry)| match entry.get_mut("book").map(Value::take) {
                Some(payload @ Value::Object(_)) => Some((key, payload)),
                _ => None,
            })
            .collect())
    }

    async fn fetch_download_links(&self, id: &str) -> Result<Vec<String>, DomainError> {
        let resp = self
            .client
            .get(self.url("download"))
            .query(&[("md5", id)])
            .send()
            .await?;

        let root = Self::read_json(resp).await?;
        let parsed: DownloadLinksResponse = serde_json::from_value(root)
            .map_err(|e| DomainError::ShapeMismatch(format!("Unexpected links payload: {}", e)))?;

        let links = parsed
            .links
            .ok_or_else(|| DomainError::ShapeMismatch("missing `links` array".to_string()))?;

        Ok(links
            .into_iter()
            .filter_map(|link| match link {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect())
    }

    async fn fetch_admin_presigned_download(&self, book_id: &str) -> Result<String, DomainError> {
        let resp = self
            .client
            .get(self.url("admin/download"))
            .query(&[("bookId", book_id)])
            .send()
            .await?;

        let root = Self::read_json(resp).await?;
        let parsed: AdminDownloadResponse = serde_json::from_value(root).map_err(|e| {
            DomainError::ShapeMismatch(format!("Unexpected download payload: {}", e))
        })?;

        parsed
            .download_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| DomainError::ShapeMismatch("missing `downloadUrl`".to_string()))
    }

    async fn probe_image(&self, url: &str) -> bool {
        // HEAD keeps the probe lightweight; only a success status confirms the image
        match self.client.head(url).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::debug!("Cover probe for {} returned {}", url, resp.status());
                false
            }
            Err(e) => {
                tracing::debug!("Cover probe for {} failed: {}", url, e);
                false
            }
        }
    }
}
