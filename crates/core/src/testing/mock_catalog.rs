//! Mock catalog source for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::catalog::{CatalogEntry, CatalogError, CatalogSource, LibraryKind, LibrarySection};

/// Mock implementation of the [`CatalogSource`] trait.
///
/// Sections and per-kind items are set up front; either call can be made to
/// fail on demand.
#[derive(Debug, Default)]
pub struct MockCatalogSource {
    sections: Mutex<Vec<LibrarySection>>,
    items: Mutex<HashMap<LibraryKind, Vec<CatalogEntry>>>,
    sections_fail: Mutex<bool>,
    failing_kinds: Mutex<HashSet<LibraryKind>>,
}

impl MockCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sections(&self, sections: Vec<LibrarySection>) {
        *self.sections.lock().unwrap() = sections;
    }

    pub fn set_items(&self, kind: LibraryKind, entries: Vec<CatalogEntry>) {
        self.items.lock().unwrap().insert(kind, entries);
    }

    /// Make the section list fetch fail.
    pub fn fail_sections(&self, fail: bool) {
        *self.sections_fail.lock().unwrap() = fail;
    }

    /// Make item fetches for one kind fail.
    pub fn fail_items(&self, kind: LibraryKind, fail: bool) {
        let mut failing = self.failing_kinds.lock().unwrap();
        if fail {
            failing.insert(kind);
        } else {
            failing.remove(&kind);
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn library_sections(&self) -> Result<Vec<LibrarySection>, CatalogError> {
        if *self.sections_fail.lock().unwrap() {
            return Err(CatalogError::Http("mock failure".to_string()));
        }
        Ok(self.sections.lock().unwrap().clone())
    }

    async fn section_items(
        &self,
        section: &LibrarySection,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        if self.failing_kinds.lock().unwrap().contains(&section.kind) {
            return Err(CatalogError::Status(500));
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&section.kind)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unset_kind_yields_empty_items() {
        let source = MockCatalogSource::new();
        let section = LibrarySection {
            id: "1".to_string(),
            title: "Movies".to_string(),
            kind: LibraryKind::Movie,
        };
        assert!(source.section_items(&section).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_toggles() {
        let source = MockCatalogSource::new();
        source.fail_sections(true);
        assert!(source.library_sections().await.is_err());
        source.fail_sections(false);
        assert!(source.library_sections().await.is_ok());
    }
}
