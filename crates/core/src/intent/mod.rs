//! Structured command intents and their validating boundary parse.

mod parse;
mod types;

pub use parse::parse_intent;
pub use types::{
    ControlBlock, MediaKind, MediaQuery, MovieQuery, MusicQuery, MusicVideoQuery, PlaylistQuery,
    ResumeMode, ShowQuery, SortOrder, StructuredIntent,
};

use thiserror::Error;

/// Translator contract violations surface through this type; any variant
/// aborts the whole request.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("Malformed intent JSON: {0}")]
    Json(String),

    #[error("Unknown media type: {0}")]
    UnknownKind(String),

    #[error("Invalid {kind:?} query: {message}")]
    Query { kind: MediaKind, message: String },
}
