//! Text similarity scoring.

use strsim::normalized_levenshtein;

/// Similarity between two texts as an integer percent, 0 to 100.
///
/// Case-insensitive. The ratio is floored, so 100 means the lowercased
/// texts are exactly equal and nothing less.
pub fn similarity_percent(a: &str, b: &str) -> u8 {
    let ratio = normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase());
    (ratio * 100.0).floor() as u8
}
