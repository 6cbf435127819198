//! Fuzzy catalog lookup.
//!
//! Spoken or transcribed queries are noisy (dropped articles, transliteration
//! variants), so exact lookup is useless. Each candidate is scored against
//! both its canonical and original title with a normalized edit-distance
//! ratio; a score above [`NEAR_EXACT`] short-circuits the scan, anything at
//! or below [`MATCH_FLOOR`] never matches.

use crate::catalog::{CatalogCache, CatalogEntry, LibraryKind};

/// Scores above this end the scan immediately (first hit in cache order wins).
pub const NEAR_EXACT: f32 = 0.95;

/// Best match must exceed this to count as a match at all.
pub const MATCH_FLOOR: f32 = 0.6;

/// Resolve free text to a catalog entry.
///
/// Returns `None` for an empty query, an unpopulated kind, or when no
/// candidate clears the floor. Single greedy pass, O(n) in catalog size.
pub fn resolve(cache: &CatalogCache, kind: LibraryKind, query: &str) -> Option<CatalogEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let snapshot = cache.snapshot(kind)?;

    let mut best: Option<&CatalogEntry> = None;
    let mut highest = 0.0f32;

    for entry in &snapshot.entries {
        let score = similarity(&query, &entry.canonical_title)
            .max(similarity(&query, &entry.original_title));
        if score > NEAR_EXACT {
            return Some(entry.clone());
        }
        if score > MATCH_FLOOR && score > highest {
            highest = score;
            best = Some(entry);
        }
    }

    best.cloned()
}

/// Normalized similarity ratio in [0, 1]: 1 - distance / max_len.
///
/// Inputs are assumed already lowercased/trimmed by the caller.
pub fn similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return if a.is_empty() { 0.0 } else { 1.0 };
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    if max_len == 0 || a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }
    let distance = levenshtein(&a_chars, &b_chars);
    1.0 - distance as f32 / max_len as f32
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    // Single-row variant of the classic DP matrix.
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, a_char) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev_diag + cost);
            prev_diag = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b.len()]
}
