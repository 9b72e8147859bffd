//! Detail Service - reconciliation of a single book record
//!
//! A detail view starts from the base record the list handed over and
//! augments it with the detail source, the download-link service and a
//! validated cover. Each mounted view has its own identity; results that
//! arrive after their view was torn down are dropped.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::{CatalogApi, DomainError};
use crate::models::{BookRecord, DetailFields, MirrorLink};
use crate::services::mirror_links::resolve_mirror_links;
use crate::services::normalizer::cover_display_url;

pub const ADVISORY_NOT_FOUND: &str = "Extra details not found; using basic info.";
pub const ADVISORY_UNREACHABLE: &str = "Could not load extra details.";
pub const ADVISORY_UNLINKABLE: &str = "Extra details unavailable for this entry; using basic info.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailState {
    Idle,
    Loading,
    Merged,
    PartiallyFailed,
}

impl DetailState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DetailState::Merged | DetailState::PartiallyFailed)
    }
}

/// Pointwise merge: each field takes the detail value when it is non-empty,
/// otherwise keeps the base value. `None` returns the base unchanged.
///
/// The cover is not part of the textual merge; see `cover_candidate`.
pub fn reconcile(base: &BookRecord, secondary: Option<&DetailFields>) -> BookRecord {
    let Some(detail) = secondary else {
        return base.clone();
    };

    fn pick(detail: &str, base: &str) -> String {
        if detail.is_empty() {
            base.to_string()
        } else {
            detail.to_string()
        }
    }

    let distributed_storage_ref = if detail.distributed_storage_ref.is_empty() {
        base.distributed_storage_ref.clone()
    } else {
        Some(detail.distributed_storage_ref.clone())
    };

    BookRecord {
        id: pick(&detail.id, &base.id),
        title: pick(&detail.title, &base.title),
        author: pick(&detail.author, &base.author),
        publisher: pick(&detail.publisher, &base.publisher),
        year: pick(&detail.year, &base.year),
        language: pick(&detail.language, &base.language),
        extension: pick(&detail.extension, &base.extension),
        filesize: pick(&detail.filesize, &base.filesize),
        series: pick(&detail.series, &base.series),
        issn: pick(&detail.issn, &base.issn),
        cover_image_ref: base.cover_image_ref.clone(),
        description: pick(&detail.description, &base.description),
        distributed_storage_ref,
        positional_id: base.positional_id && detail.id.is_empty(),
        admin_upload: base.admin_upload,
    }
}

/// Displayable cover URL offered by the detail source, if any
pub fn cover_candidate(detail: &DetailFields) -> Option<String> {
    if detail.cover_key.is_empty() {
        None
    } else {
        Some(cover_display_url(&detail.cover_key))
    }
}

/// What the view renders for one detail view instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSnapshot {
    pub view_id: Uuid,
    pub state: DetailState,
    pub record: BookRecord,
    pub advisory: Option<String>,
    /// `None` until the download-link lookup has been resolved
    pub links: Option<Vec<MirrorLink>>,
}

impl DetailSnapshot {
    fn new(view_id: Uuid, base: BookRecord) -> Self {
        Self {
            view_id,
            state: DetailState::Idle,
            record: base,
            advisory: None,
            links: None,
        }
    }

    pub fn cover_url(&self) -> String {
        cover_display_url(&self.record.cover_image_ref)
    }

    /// Links were resolved and there is nothing to offer
    pub fn no_links_found(&self) -> bool {
        self.links.as_ref().is_some_and(|l| l.is_empty())
    }
}

/// Mount point for detail views.
///
/// At most one view is mounted at a time. Every async result is applied
/// through the view id it was started for, so a late result for a torn down
/// view can never reach its successor, even when both show the same record.
#[derive(Clone)]
pub struct DetailHost {
    api: Arc<dyn CatalogApi>,
    mounted: Arc<Mutex<Option<DetailSnapshot>>>,
}

impl DetailHost {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            mounted: Arc::new(Mutex::new(None)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<DetailSnapshot>> {
        self.mounted.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mount a new view for `base`, tearing down the current one
    pub fn mount(&self, base: BookRecord) -> Uuid {
        let view_id = Uuid::new_v4();
        tracing::info!("Mounting detail view {} for book {}", view_id, base.id);
        *self.lock() = Some(DetailSnapshot::new(view_id, base));
        view_id
    }

    pub fn unmount(&self) {
        if let Some(previous) = self.lock().take() {
            tracing::info!("Detail view {} torn down", previous.view_id);
        }
    }

    pub fn snapshot(&self) -> Option<DetailSnapshot> {
        self.lock().clone()
    }

    /// Mount and start reconciliation in the background
    pub fn open(&self, base: BookRecord) -> (Uuid, JoinHandle<()>) {
        let view_id = self.mount(base);
        let host = self.clone();
        let handle = tokio::spawn(async move { host.reconcile(view_id).await });
        (view_id, handle)
    }

    /// Apply `update` only if `view_id` is still the mounted view
    fn apply<F>(&self, view_id: Uuid, update: F) -> bool
    where
        F: FnOnce(&mut DetailSnapshot),
    {
        let mut mounted = self.lock();
        match mounted.as_mut() {
            Some(snapshot) if snapshot.view_id == view_id => {
                update(snapshot);
                true
            }
            _ => {
                tracing::debug!("Discarding stale result for detail view {}", view_id);
                false
            }
        }
    }

    /// `Idle -> Loading`, once per view. Returns the base record to work from.
    fn begin(&self, view_id: Uuid) -> Option<BookRecord> {
        let mut base = None;
        self.apply(view_id, |snapshot| {
            if snapshot.state == DetailState::Idle {
                snapshot.state = DetailState::Loading;
                base = Some(snapshot.record.clone());
            }
        });
        base
    }

    /// Run the lookups for a mounted view and fold their results in.
    ///
    /// Detail and download-link lookups run concurrently and fail
    /// independently. Mirror links are resolved once both are in, since the
    /// storage reference only comes from the detail source. The cover probe
    /// starts as soon as the detail lookup resolves and never waits on the
    /// download links; the cover is adopted only if it loads.
    pub async fn reconcile(&self, view_id: Uuid) {
        let Some(base) = self.begin(view_id) else {
            return;
        };

        let Some(detail_key) = base.detail_key() else {
            self.apply(view_id, |snapshot| {
                snapshot.state = DetailState::PartiallyFailed;
                snapshot.advisory = Some(ADVISORY_UNLINKABLE.to_string());
                snapshot.links = Some(resolve_mirror_links(&snapshot.record, &[]));
            });
            return;
        };

        let (detail_done_tx, detail_done_rx) = oneshot::channel::<()>();

        let detail_branch = async {
            let outcome = self.lookup_detail(&detail_key).await;
            let cover = self.apply_detail(view_id, outcome);
            let _ = detail_done_tx.send(());
            if let Some(url) = cover {
                self.validate_and_commit_cover(view_id, url).await;
            }
        };

        let links_branch = async {
            let direct_links = self.lookup_download_links(&base.id).await;
            // Sender is dropped only after the detail outcome was applied
            let _ = detail_done_rx.await;
            self.apply(view_id, |snapshot| {
                snapshot.links = Some(resolve_mirror_links(&snapshot.record, &direct_links));
            });
        };

        tokio::join!(detail_branch, links_branch);
    }

    async fn lookup_detail(&self, key: &str) -> Result<DetailFields, DomainError> {
        let payloads = self.api.fetch_book_detail(&[key.to_string()]).await?;
        payloads
            .get(key)
            .map(DetailFields::from_payload)
            .ok_or_else(|| DomainError::ShapeMismatch(format!("no detail entry for {}", key)))
    }

    async fn lookup_download_links(&self, id: &str) -> Vec<String> {
        match self.api.fetch_download_links(id).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Download links for {} unavailable: {}", id, e);
                Vec::new()
            }
        }
    }

    /// Fold the detail outcome into the view; returns the cover to validate
    fn apply_detail(
        &self,
        view_id: Uuid,
        outcome: Result<DetailFields, DomainError>,
    ) -> Option<String> {
        match outcome {
            Ok(detail) => {
                let applied = self.apply(view_id, |snapshot| {
                    snapshot.record = reconcile(&snapshot.record, Some(&detail));
                    snapshot.state = DetailState::Merged;
                    snapshot.advisory = None;
                });
                if applied { cover_candidate(&detail) } else { None }
            }
            Err(e) => {
                tracing::warn!("Detail lookup for view {} failed: {}", view_id, e);
                let advisory = if e.is_transport() {
                    ADVISORY_UNREACHABLE
                } else {
                    ADVISORY_NOT_FOUND
                };
                self.apply(view_id, |snapshot| {
                    snapshot.state = DetailState::PartiallyFailed;
                    snapshot.advisory = Some(advisory.to_string());
                });
                None
            }
        }
    }

    /// Validate-then-commit: the displayed cover only changes after the new
    /// one is confirmed loadable.
    async fn validate_and_commit_cover(&self, view_id: Uuid, url: String) {
        let current = self.snapshot().filter(|s| s.view_id == view_id);
        if current.is_none_or(|s| s.cover_url() == url) {
            return;
        }

        if self.api.probe_image(&url).await {
            tracing::debug!("Adopting validated cover {} for view {}", url, view_id);
            self.apply(view_id, |snapshot| snapshot.record.cover_image_ref = url);
        } else {
            tracing::debug!("Keeping original cover for view {}", view_id);
        }
    }
}
