//! Intent to payload synthesis.
//!
//! A pure function of the intent and the current catalog snapshot: identical
//! inputs produce identical payloads. It never fails; missing optional fields
//! are simply left out of the payload.

use crate::catalog::{CatalogCache, LibraryKind};
use crate::intent::{
    MediaQuery, MovieQuery, MusicQuery, MusicVideoQuery, PlaylistQuery, ResumeMode, ShowQuery,
    SortOrder, StructuredIntent,
};
use crate::resolver;

use super::types::{PlaybackPayload, PlexMediaType};

/// Build the playback payload and content-type tag for an intent.
pub fn synthesize(intent: &StructuredIntent, cache: &CatalogCache) -> (PlaybackPayload, PlexMediaType) {
    // The playlist path carries only a name and forced shuffle; none of the
    // base resume/sort machinery applies.
    if let MediaQuery::Playlist(query) = &intent.query {
        return (synthesize_playlist(query), PlexMediaType::Playlist);
    }

    let mut payload = PlaybackPayload::new();

    if intent.control.resume_mode == ResumeMode::Resume {
        payload.resume = Some(1);
    } else {
        payload.resume = Some(0);
        payload.offset = Some(0);
    }

    match intent.control.sort_order {
        SortOrder::Newest => {
            payload.sort = Some("originallyAvailableAt:desc".to_string());
            payload.shuffle = Some(0);
        }
        SortOrder::Oldest => {
            payload.sort = Some("originallyAvailableAt:asc".to_string());
            payload.shuffle = Some(0);
        }
        SortOrder::TopRated => {
            payload.sort = Some("audienceRating:desc".to_string());
            payload.shuffle = Some(0);
        }
        SortOrder::Random => payload.shuffle = Some(1),
        SortOrder::Default => {
            if intent.control.shuffle {
                payload.shuffle = Some(1);
            }
        }
    }

    let media_type = match &intent.query {
        MediaQuery::Show(query) => {
            synthesize_show(&mut payload, query, intent.control.resume_mode, cache);
            PlexMediaType::Episode
        }
        MediaQuery::Music(query) => {
            synthesize_music(&mut payload, query, cache);
            PlexMediaType::Music
        }
        MediaQuery::MusicVideo(query) => {
            synthesize_music_video(&mut payload, query, cache);
            PlexMediaType::Music
        }
        MediaQuery::Movie(query) => {
            synthesize_movie(&mut payload, query, cache);
            PlexMediaType::Movie
        }
        MediaQuery::Playlist(_) => unreachable!("handled above"),
    };

    (payload, media_type)
}

fn set_library_name(payload: &mut PlaybackPayload, cache: &CatalogCache, kind: LibraryKind) {
    if let Some(snapshot) = cache.snapshot(kind) {
        payload.library_name = Some(snapshot.section.title.clone());
    }
}

fn synthesize_show(
    payload: &mut PlaybackPayload,
    query: &ShowQuery,
    resume_mode: ResumeMode,
    cache: &CatalogCache,
) {
    set_library_name(payload, cache, LibraryKind::Show);

    let name = query.name();
    let cached = name.and_then(|n| resolver::resolve(cache, LibraryKind::Show, n));
    let explicit_episode = query.episode.is_some();

    match cached {
        Some(entry) => {
            if explicit_episode {
                // Pin to the show, the season/episode filters do the rest.
                payload.show_id = Some(entry.id);
            } else {
                // Address by matched title so season filters and unwatched
                // restrictions apply against the show, not one episode.
                payload.show_title = Some(entry.canonical_title);
            }
        }
        None => {
            if let Some(name) = name {
                payload.show_title = Some(name.to_string());
            }
        }
    }

    payload.season_index = query.season;
    payload.episode_index = query.episode;

    if !explicit_episode && resume_mode == ResumeMode::Resume {
        payload.episode_unwatched = Some(1);
        payload.resume = Some(1);
    }
}

fn synthesize_music(payload: &mut PlaybackPayload, query: &MusicQuery, cache: &CatalogCache) {
    set_library_name(payload, cache, LibraryKind::Music);

    let cached = query
        .artist
        .as_deref()
        .and_then(|a| resolver::resolve(cache, LibraryKind::Music, a));

    match (cached, query.has_narrowing_filter()) {
        // "Play this artist's catalog shuffled" shortcut.
        (Some(entry), false) => {
            payload.id = Some(entry.id);
            payload.shuffle = Some(1);
        }
        _ => {
            payload.artist_title = query.artist.clone();
            payload.album_title = query.album.clone();
            payload.track_title = query.title.clone();
            payload.genre = query.genre.clone();
            payload.mood = query.mood.clone();
        }
    }

    // Year narrows even the shortcut-eligible case (it disables the
    // shortcut above, so it only ever lands next to field filters).
    payload.year = query.year;
}

fn synthesize_music_video(
    payload: &mut PlaybackPayload,
    query: &MusicVideoQuery,
    cache: &CatalogCache,
) {
    set_library_name(payload, cache, LibraryKind::Music);

    let cached = query
        .artist
        .as_deref()
        .and_then(|a| resolver::resolve(cache, LibraryKind::Music, a));

    match (cached, query.artist.as_deref()) {
        (Some(entry), _) => {
            payload.id = Some(entry.id);
            payload.shuffle = Some(1);
        }
        (None, Some(artist)) => {
            payload.artist_title = Some(artist.to_string());
            payload.shuffle = Some(1);
        }
        (None, None) => {}
    }
}

fn synthesize_movie(payload: &mut PlaybackPayload, query: &MovieQuery, cache: &CatalogCache) {
    set_library_name(payload, cache, LibraryKind::Movie);

    if let (Some(title), false) = (query.title.as_deref(), query.has_secondary_filter()) {
        // Bare title: prefer identifier addressing for precision.
        match resolver::resolve(cache, LibraryKind::Movie, title) {
            Some(entry) => payload.id = Some(entry.id),
            None => payload.title = Some(title.to_string()),
        }
        return;
    }

    // With secondary filters the title is just one filter among the rest.
    payload.title = query.title.clone();
    payload.actor = query.actor.clone();
    payload.director = query.director.clone();
    payload.genre = query.genre.clone();
    payload.year = query.year;
    if query.unwatched == Some(true) {
        payload.unwatched = Some(1);
    }
    payload.studio = query.studio.clone();
    payload.collection = query.collection.clone();
    payload.country = query.country.clone();
    payload.content_rating = query.content_rating.clone();
    payload.decade = query.decade;
}

fn synthesize_playlist(query: &PlaylistQuery) -> PlaybackPayload {
    PlaybackPayload {
        playlist_name: query.title.clone(),
        shuffle: Some(1),
        ..Default::default()
    }
}
