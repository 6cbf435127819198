//! Validating boundary parse for translator replies.
//!
//! The translator contract is a single JSON object `{control, query}`. The
//! `control.type` tag selects which kind-specific query struct the `query`
//! object must deserialize into; numeric fields are declared as integers, so
//! a non-numeric value fails the request here instead of producing a broken
//! payload later.

use serde::Deserialize;
use serde_json::Value;

use super::types::{
    ControlBlock, MediaKind, MediaQuery, MovieQuery, MusicQuery, MusicVideoQuery, PlaylistQuery,
    ShowQuery, StructuredIntent,
};
use super::IntentError;

#[derive(Debug, Deserialize)]
struct RawIntent {
    #[serde(default)]
    control: Value,
    #[serde(default)]
    query: Value,
}

pub fn parse_intent(json: &str) -> Result<StructuredIntent, IntentError> {
    let raw: RawIntent =
        serde_json::from_str(json).map_err(|e| IntentError::Json(e.to_string()))?;

    let kind = match raw.control.get("type") {
        None | Some(Value::Null) => MediaKind::Movie,
        Some(Value::String(s)) => serde_json::from_value(Value::String(s.clone()))
            .map_err(|_| IntentError::UnknownKind(s.clone()))?,
        Some(other) => return Err(IntentError::UnknownKind(other.to_string())),
    };

    let control: ControlBlock = serde_json::from_value(raw.control)
        .map_err(|e| IntentError::Json(format!("control block: {}", e)))?;

    let query = if raw.query.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        raw.query
    };

    let query = match kind {
        MediaKind::Movie => MediaQuery::Movie(parse_query::<MovieQuery>(kind, query)?),
        MediaKind::Show => MediaQuery::Show(parse_query::<ShowQuery>(kind, query)?),
        MediaKind::Music => MediaQuery::Music(parse_query::<MusicQuery>(kind, query)?),
        MediaKind::MusicVideo => {
            MediaQuery::MusicVideo(parse_query::<MusicVideoQuery>(kind, query)?)
        }
        MediaKind::Playlist => MediaQuery::Playlist(parse_query::<PlaylistQuery>(kind, query)?),
    };

    Ok(StructuredIntent { control, query })
}

fn parse_query<T: serde::de::DeserializeOwned>(
    kind: MediaKind,
    query: Value,
) -> Result<T, IntentError> {
    serde_json::from_value(query).map_err(|e| IntentError::Query {
        kind,
        message: e.to_string(),
    })
}
