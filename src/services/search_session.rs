//! Catalog search session
//!
//! Owns the current query, the result set of the last search and the list
//! view's page window. Created once at startup and handed to whoever renders
//! the list; the detail view only ever receives copies of its records.

use std::sync::Arc;

use crate::domain::CatalogApi;
use crate::models::BookRecord;
use crate::services::normalizer::normalize_entries;
use crate::utils::pagination::{PageWindow, page_size_for_width};

pub struct CatalogSearchSession {
    api: Arc<dyn CatalogApi>,
    query: String,
    results: Vec<BookRecord>,
    window: PageWindow,
}

impl CatalogSearchSession {
    pub fn new(api: Arc<dyn CatalogApi>, page_size: usize) -> Self {
        Self {
            api,
            query: String::new(),
            results: Vec::new(),
            window: PageWindow::new(page_size),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the pending query without searching
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Run a search and replace the result set.
    ///
    /// Any failure yields an empty set: the list view shows "no results" for
    /// both an empty match and an unreachable catalog. The query is forwarded
    /// unmodified, including the empty string.
    pub async fn search(&mut self, query: impl Into<String>) -> &[BookRecord] {
        self.query = query.into();
        self.window.reset();

        let results = match self.api.search_catalog(&self.query).await {
            Ok(raw) => normalize_entries(&raw),
            Err(e) => {
                tracing::warn!("Search for {:?} failed, showing no results: {}", self.query, e);
                Vec::new()
            }
        };

        tracing::info!("Search {:?} returned {} books", self.query, results.len());
        self.results = results;
        &self.results
    }

    /// Search again with the pending query
    pub async fn submit(&mut self) -> &[BookRecord] {
        let query = self.query.clone();
        self.search(query).await
    }

    pub fn results(&self) -> &[BookRecord] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Records visible on the current page
    pub fn visible(&self) -> &[BookRecord] {
        self.window.slice(&self.results)
    }

    pub fn page_count(&self) -> usize {
        self.window.page_count(self.results.len())
    }

    pub fn page_label(&self) -> String {
        self.window.label(self.results.len())
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.window.set_page_size(page_size);
    }

    /// Viewport resized; always lands back on page 1
    pub fn set_viewport_width(&mut self, width_px: u32) {
        self.set_page_size(page_size_for_width(width_px));
    }

    pub fn next_page(&mut self) {
        self.window.next_page(self.results.len());
    }

    pub fn previous_page(&mut self) {
        self.window.previous_page();
    }

    pub fn go_to_page(&mut self, page_index: usize) {
        self.window.go_to(page_index);
    }

    /// Independent working copy of a record for the detail view
    pub fn select(&self, id: &str) -> Option<BookRecord> {
        self.results.iter().find(|r| r.id == id).cloned()
    }

    /// Working copy of the record at a 0-based position in the result set
    pub fn select_at(&self, position: usize) -> Option<BookRecord> {
        self.results.get(position).cloned()
    }
}
