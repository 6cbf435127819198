//! Media backend catalog: section/item fetch and the in-memory snapshot cache.

mod cache;
mod plex;
mod types;

pub use cache::{spawn_refresh_loop, CatalogCache};
pub use plex::PlexCatalogClient;
pub use types::{CatalogEntry, CatalogSnapshot, CatalogStatus, LibraryKind, LibrarySection};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Backend returned status {0}")]
    Status(u16),

    #[error("XML parse error: {0}")]
    Xml(String),
}

/// Read side of the media backend's catalog API.
///
/// Two operations only: list sections, list a section's items.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn library_sections(&self) -> Result<Vec<LibrarySection>, CatalogError>;

    async fn section_items(
        &self,
        section: &LibrarySection,
    ) -> Result<Vec<CatalogEntry>, CatalogError>;
}
