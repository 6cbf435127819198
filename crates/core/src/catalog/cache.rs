//! In-memory catalog snapshot cache.
//!
//! One snapshot per library kind, replaced wholesale on refresh. Readers
//! clone an `Arc` and never block a refresh in progress; a stale read during
//! refresh is acceptable.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::metrics;

use super::{CatalogSnapshot, CatalogSource, CatalogStatus, LibraryKind};

#[derive(Debug, Default)]
pub struct CatalogCache {
    snapshots: RwLock<HashMap<LibraryKind, Arc<CatalogSnapshot>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot for a kind, if any refresh has populated it.
    pub fn snapshot(&self, kind: LibraryKind) -> Option<Arc<CatalogSnapshot>> {
        self.snapshots
            .read()
            .expect("catalog cache lock poisoned")
            .get(&kind)
            .cloned()
    }

    /// Atomically replace one kind's snapshot.
    pub fn replace(&self, kind: LibraryKind, snapshot: CatalogSnapshot) {
        self.snapshots
            .write()
            .expect("catalog cache lock poisoned")
            .insert(kind, Arc::new(snapshot));
    }

    /// True until the first successful refresh populates any kind.
    pub fn is_empty(&self) -> bool {
        self.snapshots
            .read()
            .expect("catalog cache lock poisoned")
            .is_empty()
    }

    pub fn status(&self) -> Vec<CatalogStatus> {
        let snapshots = self.snapshots.read().expect("catalog cache lock poisoned");
        let mut status: Vec<CatalogStatus> = snapshots
            .values()
            .map(|s| CatalogStatus {
                kind: s.section.kind,
                section_title: s.section.title.clone(),
                entries: s.entries.len(),
                refreshed_at: s.refreshed_at,
            })
            .collect();
        status.sort_by_key(|s| s.kind.as_str());
        status
    }

    /// Refresh from the backend.
    ///
    /// A section-list failure aborts the whole refresh and keeps every prior
    /// snapshot; a failure fetching one kind's items keeps that kind's prior
    /// snapshot without blocking the other kinds. Nothing here propagates:
    /// the cache serves stale data until a later refresh succeeds.
    pub async fn refresh(&self, source: &dyn CatalogSource) {
        let sections = match source.library_sections().await {
            Ok(sections) => sections,
            Err(e) => {
                warn!("Catalog refresh aborted, section list fetch failed: {}", e);
                metrics::CATALOG_REFRESHES.with_label_values(&["failed"]).inc();
                return;
            }
        };

        let mut refreshed = 0usize;
        for section in sections {
            match source.section_items(&section).await {
                Ok(entries) => {
                    debug!(
                        kind = %section.kind,
                        section = %section.title,
                        entries = entries.len(),
                        "Catalog section refreshed"
                    );
                    self.replace(
                        section.kind,
                        CatalogSnapshot {
                            section,
                            entries,
                            refreshed_at: Utc::now(),
                        },
                    );
                    refreshed += 1;
                }
                Err(e) => {
                    warn!(
                        kind = %section.kind,
                        "Keeping stale catalog for section, item fetch failed: {}",
                        e
                    );
                }
            }
        }

        metrics::CATALOG_REFRESHES.with_label_values(&["ok"]).inc();
        info!(sections = refreshed, "Catalog refresh complete");
    }
}

/// Spawn the periodic refresh loop: one refresh immediately, then one per
/// interval until the handle is dropped or aborted.
pub fn spawn_refresh_loop(
    cache: Arc<CatalogCache>,
    source: Arc<dyn CatalogSource>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            cache.refresh(source.as_ref()).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, LibrarySection};
    use crate::testing::MockCatalogSource;

    fn section(kind: LibraryKind, id: &str, title: &str) -> LibrarySection {
        LibrarySection {
            id: id.to_string(),
            title: title.to_string(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_refresh_populates_all_kinds() {
        let source = MockCatalogSource::new();
        source.set_sections(vec![
            section(LibraryKind::Movie, "1", "Movies"),
            section(LibraryKind::Music, "3", "Music"),
        ]);
        source.set_items(
            LibraryKind::Movie,
            vec![CatalogEntry::new("Dune", "", Some(2021), "101")],
        );
        source.set_items(
            LibraryKind::Music,
            vec![CatalogEntry::new("Linkin Park", "", None, "201")],
        );

        let cache = CatalogCache::new();
        assert!(cache.is_empty());

        cache.refresh(&source).await;

        assert!(!cache.is_empty());
        assert_eq!(cache.snapshot(LibraryKind::Movie).unwrap().entries.len(), 1);
        assert_eq!(
            cache.snapshot(LibraryKind::Music).unwrap().section.title,
            "Music"
        );
        assert!(cache.snapshot(LibraryKind::Show).is_none());
    }

    #[tokio::test]
    async fn test_section_list_failure_keeps_prior_cache() {
        let source = MockCatalogSource::new();
        source.set_sections(vec![section(LibraryKind::Movie, "1", "Movies")]);
        source.set_items(
            LibraryKind::Movie,
            vec![CatalogEntry::new("Dune", "", Some(2021), "101")],
        );

        let cache = CatalogCache::new();
        cache.refresh(&source).await;

        source.fail_sections(true);
        cache.refresh(&source).await;

        // Prior snapshot survives a failed refresh untouched.
        assert_eq!(cache.snapshot(LibraryKind::Movie).unwrap().entries.len(), 1);
    }

    #[tokio::test]
    async fn test_one_kind_failure_does_not_block_others() {
        let source = MockCatalogSource::new();
        source.set_sections(vec![
            section(LibraryKind::Movie, "1", "Movies"),
            section(LibraryKind::Show, "2", "TV Shows"),
        ]);
        source.set_items(
            LibraryKind::Movie,
            vec![CatalogEntry::new("Dune", "", Some(2021), "101")],
        );
        source.set_items(
            LibraryKind::Show,
            vec![CatalogEntry::new("Severance", "", None, "301")],
        );

        let cache = CatalogCache::new();
        cache.refresh(&source).await;

        // Movies now fail; shows gain an entry.
        source.fail_items(LibraryKind::Movie, true);
        source.set_items(
            LibraryKind::Show,
            vec![
                CatalogEntry::new("Severance", "", None, "301"),
                CatalogEntry::new("Dark", "", None, "302"),
            ],
        );
        cache.refresh(&source).await;

        assert_eq!(cache.snapshot(LibraryKind::Movie).unwrap().entries.len(), 1);
        assert_eq!(cache.snapshot(LibraryKind::Show).unwrap().entries.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_is_wholesale() {
        let cache = CatalogCache::new();
        cache.replace(
            LibraryKind::Movie,
            CatalogSnapshot {
                section: section(LibraryKind::Movie, "1", "Movies"),
                entries: vec![CatalogEntry::new("Old", "", None, "1")],
                refreshed_at: Utc::now(),
            },
        );
        let old = cache.snapshot(LibraryKind::Movie).unwrap();

        cache.replace(
            LibraryKind::Movie,
            CatalogSnapshot {
                section: section(LibraryKind::Movie, "1", "Movies"),
                entries: vec![CatalogEntry::new("New", "", None, "2")],
                refreshed_at: Utc::now(),
            },
        );

        // The old Arc is still intact for readers that grabbed it.
        assert_eq!(old.entries[0].canonical_title, "old");
        let new = cache.snapshot(LibraryKind::Movie).unwrap();
        assert_eq!(new.entries[0].canonical_title, "new");
    }
}
