use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const UNKNOWN_PUBLISHER: &str = "Unknown Publisher";
pub const NOT_AVAILABLE: &str = "N/A";

/// Bundled cover shown when no source provides one
pub const PLACEHOLDER_COVER: &str = "assets/placeholder-cover.jpg";

/// Canonical book record shared by the list and detail views.
///
/// Every field is always populated: either with a source value, a sentinel
/// (`"Unknown"`, `"N/A"`, ...) or an empty string. Records are replaced, never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub language: String,
    pub extension: String,
    pub filesize: String,
    pub series: String,
    pub issn: String,
    /// Absolute URL or a relative cover key, see `normalizer::cover_display_url`
    pub cover_image_ref: String,
    /// Opaque formatted text, may contain markup
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributed_storage_ref: Option<String>,
    /// `id` was derived from the list position rather than a source identifier
    #[serde(default)]
    pub positional_id: bool,
    /// Uploaded through the admin surface rather than found in the remote catalog
    #[serde(default)]
    pub admin_upload: bool,
}

impl BookRecord {
    /// A record with every field at its default sentinel
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: UNKNOWN_TITLE.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            publisher: UNKNOWN_PUBLISHER.to_string(),
            year: NOT_AVAILABLE.to_string(),
            language: NOT_AVAILABLE.to_string(),
            extension: NOT_AVAILABLE.to_string(),
            filesize: NOT_AVAILABLE.to_string(),
            series: NOT_AVAILABLE.to_string(),
            issn: NOT_AVAILABLE.to_string(),
            cover_image_ref: PLACEHOLDER_COVER.to_string(),
            description: String::new(),
            distributed_storage_ref: None,
            positional_id: false,
            admin_upload: false,
        }
    }

    /// Identifier usable for remote lookups and mirror links.
    ///
    /// Position-derived ids are only unique inside one result set, so they never
    /// leave the client.
    pub fn linkable_id(&self) -> Option<&str> {
        if self.positional_id || self.id.trim().is_empty() {
            None
        } else {
            Some(self.id.as_str())
        }
    }

    /// Key used by the detail source, which is uppercase-keyed
    pub fn detail_key(&self) -> Option<String> {
        self.linkable_id().map(|id| id.to_uppercase())
    }
}
