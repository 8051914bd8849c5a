//! # banter-match
//!
//! The matching layer: similarity scoring, closest-match retrieval over the
//! statement corpus, response selection strategies, and the last-resort
//! random fallback adapter.

pub mod closest_match;
pub mod random_fallback;
pub mod ratio;
pub mod selection;

pub use closest_match::ClosestMatch;
pub use random_fallback::RandomFallback;
pub use ratio::similarity_percent;
pub use selection::select_response;
