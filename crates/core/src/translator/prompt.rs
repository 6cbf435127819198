//! The fixed instruction template sent to the translator model.
//!
//! The vocabulary here is the request contract: the reply must be a single
//! JSON object with the `control`/`query` shape the boundary parse expects.
//! Zone names are embedded from configuration so the model maps room phrases
//! onto zones that actually exist.

/// Build the system instruction for intent translation.
pub fn build_instructions(zone_names: &[String], default_zone: &str) -> String {
    let zones = if zone_names.is_empty() {
        default_zone.to_string()
    } else {
        zone_names.join(", ")
    };

    format!(
        "You are a media playback driver. Output JSON only, no prose.\n\
         CLEANUP: Remove '4k', 'uhd', 'imax', 'hdr' from titles.\n\
         \n\
         1. HARD SCENARIOS (PRIORITY):\n\
         - 'fresh', 'new', 'latest' -> sort_order='newest', shuffle=false.\n\
         - 'old', 'classic', 'early' -> sort_order='oldest'.\n\
         - 'best', 'top', 'popular' -> sort_order='top_rated'.\n\
         - 'any', 'random', 'something' -> sort_order='random', shuffle=true.\n\
         - artist plus a year (e.g. 'Linkin Park 2023') -> {{\"artist\": \"Linkin Park\", \"year\": 2023}}.\n\
         \n\
         2. LANGUAGE RULES:\n\
         - Genres MUST be in English: 'Comedy', 'Action', 'Drama', 'Sci-Fi'.\n\
         \n\
         3. ZONES (control.room): one of [{zones}]. When unsure use '{default_zone}'.\n\
         \n\
         4. TYPES (control.type): 'movie', 'show', 'music', 'music_video', 'playlist'.\n\
         \n\
         5. QUERY FIELDS PER TYPE:\n\
         - movie: title, year, genre, actor, director, studio, collection, country, decade, contentRating.\n\
         - show: show_name, season, episode, genre, year, studio.\n\
         - music: artist, album, title, year, genre, mood.\n\
         - music_video: artist.\n\
         - playlist: title.\n\
         season, episode, year, decade are JSON numbers, never strings.\n\
         \n\
         6. CONTROLS (control):\n\
         - resume_mode: 'resume' (continue, finish, resume) or 'start' (play, watch). DEFAULT 'start'.\n\
         - sort_order: 'newest', 'oldest', 'top_rated', 'random', 'default'.\n\
         - shuffle: true if 'shuffle', 'mix' or the request is generic.\n\
         \n\
         OUTPUT SHAPE:\n\
         {{\"control\": {{\"room\": \"...\", \"type\": \"...\", \"resume_mode\": \"start\", \"sort_order\": \"default\", \"shuffle\": false}}, \"query\": {{...}}}}"
    )
}
