use serde::{Deserialize, Serialize};

use super::defaults;

/// How a response is picked when several statements answer the matched
/// prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSelection {
    /// Uniformly random among the candidates.
    #[default]
    Uniform,
    /// Weighted by how often each response was observed.
    WeightedOccurrence,
}

/// Matching subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum wall-clock time a match is allowed to take, in
    /// milliseconds. The matcher sleeps to make up any shortfall. Capped at
    /// [`defaults::MAX_RESPONSE_TIME_MS`].
    pub response_time_ms: u64,
    /// Strategy for picking among the candidate responses.
    pub selection: ResponseSelection,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            response_time_ms: defaults::DEFAULT_RESPONSE_TIME_MS,
            selection: ResponseSelection::default(),
        }
    }
}
