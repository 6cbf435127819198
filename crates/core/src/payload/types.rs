use serde::Serialize;

/// Content-type tag on the final play command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlexMediaType {
    Movie,
    Episode,
    Music,
    Playlist,
}

impl PlexMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlexMediaType::Movie => "MOVIE",
            PlexMediaType::Episode => "EPISODE",
            PlexMediaType::Music => "MUSIC",
            PlexMediaType::Playlist => "PLAYLIST",
        }
    }
}

/// The backend parameter set selecting what to play.
///
/// Serializes to the JSON object Plex's play_media service expects: dotted
/// parameter names, 0/1 integer flags, absent fields omitted. Identifier
/// addressing (`id`, `show.id`) and free-text addressing (`title`,
/// `show.title`) are mutually exclusive per target; the synthesizer never
/// sets both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_name: Option<String>,

    /// Identifier addressing of the primary target (movie, artist).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "show.id", skip_serializing_if = "Option::is_none")]
    pub show_id: Option<String>,
    #[serde(rename = "show.title", skip_serializing_if = "Option::is_none")]
    pub show_title: Option<String>,
    #[serde(rename = "season.index", skip_serializing_if = "Option::is_none")]
    pub season_index: Option<u32>,
    #[serde(rename = "episode.index", skip_serializing_if = "Option::is_none")]
    pub episode_index: Option<u32>,
    #[serde(rename = "episode.unwatched", skip_serializing_if = "Option::is_none")]
    pub episode_unwatched: Option<u8>,

    #[serde(rename = "artist.title", skip_serializing_if = "Option::is_none")]
    pub artist_title: Option<String>,
    #[serde(rename = "album.title", skip_serializing_if = "Option::is_none")]
    pub album_title: Option<String>,
    #[serde(rename = "track.title", skip_serializing_if = "Option::is_none")]
    pub track_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unwatched: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "contentRating", skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decade: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
}

impl PlaybackPayload {
    /// Base payload for library playback.
    pub fn new() -> Self {
        Self {
            allow_multiple: Some(1),
            ..Default::default()
        }
    }

    /// Serialized form used as the play command's content id.
    pub fn to_content_id(&self) -> String {
        serde_json::to_string(self).expect("payload serialization cannot fail")
    }
}
