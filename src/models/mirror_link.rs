use serde::Serialize;

/// Where a mirror link comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorSource {
    /// Returned by the download-link lookup
    Direct,
    /// Built from the record id against a catalog mirror
    Catalog,
    /// Built from the distributed storage reference against a gateway
    Gateway,
}

/// One download or mirror target, presented in ascending `priority` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorLink {
    pub label: String,
    pub url: String,
    pub priority: u32,
    pub source: MirrorSource,
    /// Visually distinguished only; behaves like any other link
    pub primary: bool,
}
