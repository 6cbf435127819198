use serde::{Deserialize, Serialize};

/// Recognized media kinds in `control.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Show,
    Music,
    MusicVideo,
    Playlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeMode {
    Resume,
    #[default]
    #[serde(other)]
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Newest,
    Oldest,
    TopRated,
    Random,
    #[default]
    #[serde(other)]
    Default,
}

/// Playback controls common to every media kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlBlock {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub resume_mode: ResumeMode,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub shuffle: bool,
}

/// Kind-specific query fields. Each variant carries only the fields valid
/// for that kind; the boundary parse rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaQuery {
    Movie(MovieQuery),
    Show(ShowQuery),
    Music(MusicQuery),
    MusicVideo(MusicVideoQuery),
    Playlist(PlaylistQuery),
}

impl MediaQuery {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaQuery::Movie(_) => MediaKind::Movie,
            MediaQuery::Show(_) => MediaKind::Show,
            MediaQuery::Music(_) => MediaKind::Music,
            MediaQuery::MusicVideo(_) => MediaKind::MusicVideo,
            MediaQuery::Playlist(_) => MediaKind::Playlist,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieQuery {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub studio: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, rename = "contentRating")]
    pub content_rating: Option<String>,
    #[serde(default)]
    pub decade: Option<u32>,
    #[serde(default)]
    pub unwatched: Option<bool>,
}

impl MovieQuery {
    /// Any filter besides the title itself. When one is present the title
    /// participates as a plain filter instead of identifier addressing.
    pub fn has_secondary_filter(&self) -> bool {
        self.actor.is_some()
            || self.genre.is_some()
            || self.studio.is_some()
            || self.collection.is_some()
            || self.decade.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowQuery {
    #[serde(default)]
    pub show_name: Option<String>,
    /// Fallback when the translator puts the show name in `title`.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub studio: Option<String>,
}

impl ShowQuery {
    pub fn name(&self) -> Option<&str> {
        self.show_name.as_deref().or(self.title.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicQuery {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// Track title.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
}

impl MusicQuery {
    /// Anything narrowing playback below "this artist's whole catalog".
    pub fn has_narrowing_filter(&self) -> bool {
        self.year.is_some()
            || self.album.is_some()
            || self.title.is_some()
            || self.genre.is_some()
            || self.mood.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicVideoQuery {
    #[serde(default)]
    pub artist: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistQuery {
    #[serde(default)]
    pub title: Option<String>,
}

/// A fully validated command intent: one control block, one kind-specific
/// query. Produced once per request by the boundary parse, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredIntent {
    pub control: ControlBlock,
    pub query: MediaQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_defaults() {
        let control: ControlBlock = serde_json::from_str("{}").unwrap();
        assert_eq!(control.resume_mode, ResumeMode::Start);
        assert_eq!(control.sort_order, SortOrder::Default);
        assert!(!control.shuffle);
        assert!(control.room.is_none());
    }

    #[test]
    fn test_unknown_sort_order_falls_back_to_default() {
        let control: ControlBlock =
            serde_json::from_str(r#"{"sort_order": "sideways"}"#).unwrap();
        assert_eq!(control.sort_order, SortOrder::Default);
    }

    #[test]
    fn test_show_name_fallback() {
        let query = ShowQuery {
            title: Some("severance".to_string()),
            ..Default::default()
        };
        assert_eq!(query.name(), Some("severance"));

        let query = ShowQuery {
            show_name: Some("dark".to_string()),
            title: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(query.name(), Some("dark"));
    }

    #[test]
    fn test_movie_secondary_filter_detection() {
        let bare = MovieQuery {
            title: Some("dune".to_string()),
            year: Some(2021),
            ..Default::default()
        };
        // Year alone does not demote the title to a filter.
        assert!(!bare.has_secondary_filter());

        let filtered = MovieQuery {
            title: Some("dune".to_string()),
            genre: Some("Sci-Fi".to_string()),
            ..Default::default()
        };
        assert!(filtered.has_secondary_filter());
    }
}
