use serde::Serialize;
use serde_json::Value;

use crate::utils::fields::text_field;

/// Secondary detail payload in structural form.
///
/// Every field is present; an empty string means the detail source did not
/// provide it. Built leniently from whatever JSON the detail source returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailFields {
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
    pub description: String,
    pub cover_key: String,
    pub distributed_storage_ref: String,
}

impl DetailFields {
    pub fn from_payload(payload: &Value) -> Self {
        let field = |keys: &[&str]| text_field(payload, keys).unwrap_or_default();

        Self {
            id: field(&["id", "md5"]),
            title: field(&["title"]),
            author: field(&["author"]),
            publisher: field(&["publisher"]),
            year: field(&["year"]),
            language: field(&["language"]),
            extension: field(&["extension", "format"]),
            filesize: field(&["filesize", "size"]),
            series: field(&["series"]),
            issn: field(&["issn"]),
            description: field(&["descr", "description"]),
            cover_key: field(&["coverurl"]),
            distributed_storage_ref: field(&["ipfs_cid", "ipfsCid"]),
        }
    }
}
