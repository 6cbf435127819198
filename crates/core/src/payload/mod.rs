//! Playback payload synthesis: structured intent in, backend parameters out.

mod synthesize;
mod types;

pub use synthesize::synthesize;
pub use types::{PlaybackPayload, PlexMediaType};
