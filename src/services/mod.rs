//! Services Layer
//!
//! Client-side logic between the catalog backend and the views: record
//! normalization, the search session, detail reconciliation and mirror links.

pub mod admin_downloads;
pub mod detail_service;
pub mod mirror_links;
pub mod normalizer;
pub mod search_session;

// Re-export for convenience
pub use detail_service::{DetailHost, DetailSnapshot, DetailState, reconcile};
pub use mirror_links::resolve_mirror_links;
pub use normalizer::{cover_display_url, normalize_entries, normalize_entry};
pub use search_session::CatalogSearchSession;
