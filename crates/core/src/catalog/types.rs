use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Library content kinds the cache tracks.
///
/// Plex reports music libraries with section type "artist"; those classify
/// as `Music` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryKind {
    Movie,
    Show,
    Music,
}

impl LibraryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryKind::Movie => "movie",
            LibraryKind::Show => "show",
            LibraryKind::Music => "music",
        }
    }

    /// Classify a Plex section type string.
    pub fn from_section_type(section_type: &str) -> Option<Self> {
        match section_type {
            "movie" => Some(LibraryKind::Movie),
            "show" => Some(LibraryKind::Show),
            "artist" | "music" => Some(LibraryKind::Music),
            _ => None,
        }
    }
}

impl std::fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A library section as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySection {
    pub id: String,
    /// Human-facing section title, emitted as `library_name` in payloads.
    pub title: String,
    pub kind: LibraryKind,
}

/// One catalog item. Titles are stored lowercased; matching is
/// case-insensitive throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub canonical_title: String,
    pub original_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    /// Backend rating key, used for identifier addressing.
    pub id: String,
}

impl CatalogEntry {
    pub fn new(title: &str, original_title: &str, year: Option<u32>, id: &str) -> Self {
        Self {
            canonical_title: title.trim().to_lowercase(),
            original_title: original_title.trim().to_lowercase(),
            year,
            id: id.to_string(),
        }
    }
}

/// Immutable per-kind snapshot; replaced wholesale on refresh.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub section: LibrarySection,
    pub entries: Vec<CatalogEntry>,
    pub refreshed_at: DateTime<Utc>,
}

/// Per-kind cache status for the API.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub kind: LibraryKind,
    pub section_title: String,
    pub entries: usize,
    pub refreshed_at: DateTime<Utc>,
}
