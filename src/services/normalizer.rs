//! Record normalization
//!
//! Turns one loosely-typed search entry into a canonical `BookRecord`.
//! Normalization cannot fail: every attribute is resolved as
//! explicit field -> alias -> sentinel.

use serde_json::Value;

use crate::models::book::{
    BookRecord, NOT_AVAILABLE, PLACEHOLDER_COVER, UNKNOWN_AUTHOR, UNKNOWN_PUBLISHER,
    UNKNOWN_TITLE,
};
use crate::utils::fields::{flag_field, text_field};

/// Image host serving relative cover keys
pub const COVER_HOST: &str = "https://libgen.li/covers";

/// Normalize one raw entry found at `position` in the source sequence.
pub fn normalize_entry(raw: &Value, position: usize) -> BookRecord {
    let field = |keys: &[&str], default: &str| {
        text_field(raw, keys).unwrap_or_else(|| default.to_string())
    };

    let (id, positional_id) = match text_field(raw, &["id", "md5"]) {
        Some(id) => (id, false),
        None => (position.to_string(), true),
    };

    BookRecord {
        id,
        title: field(&["title"], UNKNOWN_TITLE),
        author: field(&["author"], UNKNOWN_AUTHOR),
        publisher: field(&["publisher"], UNKNOWN_PUBLISHER),
        year: field(&["year"], NOT_AVAILABLE),
        language: field(&["language"], NOT_AVAILABLE),
        extension: field(&["extension", "format"], NOT_AVAILABLE),
        filesize: field(&["filesize", "size"], NOT_AVAILABLE),
        series: field(&["series"], NOT_AVAILABLE),
        issn: field(&["issn"], NOT_AVAILABLE),
        cover_image_ref: resolve_cover_ref(
            text_field(raw, &["imgUrl", "img_url"]).as_deref(),
            text_field(raw, &["coverurl", "cover_url"]).as_deref(),
        ),
        description: field(&["descr", "description"], ""),
        distributed_storage_ref: text_field(raw, &["ipfs_cid", "ipfsCid"]),
        positional_id,
        admin_upload: flag_field(raw, "isAdminBook"),
    }
}

/// Normalize a whole response, preserving server order.
pub fn normalize_entries(raw: &[Value]) -> Vec<BookRecord> {
    raw.iter()
        .enumerate()
        .map(|(position, entry)| normalize_entry(entry, position))
        .collect()
}

/// Pick the cover reference: absolute image URL, else cover key, else placeholder.
pub fn resolve_cover_ref(image_url: Option<&str>, cover_key: Option<&str>) -> String {
    if let Some(url) = image_url
        && is_absolute(url)
    {
        return url.to_string();
    }
    match cover_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => PLACEHOLDER_COVER.to_string(),
    }
}

/// Map a cover reference to something displayable. Pure; unknown input maps
/// to a cover-host URL, never to an error.
pub fn cover_display_url(cover_ref: &str) -> String {
    let cover_ref = cover_ref.trim();
    if cover_ref.is_empty() || cover_ref == PLACEHOLDER_COVER {
        PLACEHOLDER_COVER.to_string()
    } else if is_absolute(cover_ref) {
        cover_ref.to_string()
    } else {
        format!("{}/{}", COVER_HOST, cover_ref.trim_start_matches('/'))
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
