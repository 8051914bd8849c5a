//! ClosestMatch: answers an input by finding the known statement most
//! similar to it, then replying with something that answered that statement
//! before.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use banter_core::config::{defaults, MatchConfig};
use banter_core::conversation::{Confidence, Statement};
use banter_core::errors::{BanterError, BanterResult};
use banter_core::traits::{FilterSpec, ILogicAdapter, IStatementStorage, ScoredStatement};

use crate::ratio::similarity_percent;
use crate::selection::select_response;

/// The primary logic adapter.
///
/// Needs a storage collaborator to do anything useful; a detached instance
/// reports `can_process` false and fails `process` with `EmptyDataset`.
pub struct ClosestMatch {
    storage: Option<Arc<dyn IStatementStorage>>,
    config: MatchConfig,
}

impl ClosestMatch {
    pub fn new(storage: Arc<dyn IStatementStorage>) -> Self {
        Self {
            storage: Some(storage),
            config: MatchConfig::default(),
        }
    }

    /// An adapter with no storage collaborator attached yet.
    pub fn detached() -> Self {
        Self {
            storage: None,
            config: MatchConfig::default(),
        }
    }

    pub fn with_config(storage: Arc<dyn IStatementStorage>, config: MatchConfig) -> Self {
        Self {
            storage: Some(storage),
            config,
        }
    }

    pub fn set_storage(&mut self, storage: Arc<dyn IStatementStorage>) {
        self.storage = Some(storage);
    }

    /// Find the statement with known responses closest to the input.
    ///
    /// When no statement has a known response the match degrades to a random
    /// statement at zero confidence. An entirely empty corpus fails with
    /// `EmptyDataset`.
    pub fn get(&self, input: &Statement) -> BanterResult<ScoredStatement> {
        let started = Instant::now();
        let storage = self.storage.as_ref().ok_or(BanterError::EmptyDataset)?;

        let candidates = storage.get_response_statements()?;

        let Some((first, rest)) = candidates.split_first() else {
            info!("no statements with known responses, choosing a random statement");
            let random = storage.get_random()?;
            return Ok(ScoredStatement::new(Confidence::ZERO, random));
        };

        let mut best = first;
        let mut best_percent = similarity_percent(input.text(), first.text());
        for candidate in rest {
            let percent = similarity_percent(input.text(), candidate.text());
            // Strict comparison keeps the earliest candidate on ties.
            if percent > best_percent {
                best_percent = percent;
                best = candidate;
            }
        }

        debug!(
            input = %input.text(),
            best = %best.text(),
            percent = best_percent,
            "scored candidates"
        );

        self.pace(started);

        Ok(ScoredStatement::new(
            Confidence::from_percent(best_percent),
            best.clone(),
        ))
    }

    /// Sleep out whatever remains of the configured response time.
    /// The sleep itself is capped, so a misconfigured response time cannot
    /// stall a request for more than ten minutes.
    fn pace(&self, started: Instant) {
        let target = Duration::from_millis(self.config.response_time_ms);
        let ceiling = Duration::from_millis(defaults::MAX_RESPONSE_TIME_MS);
        let remaining = target.saturating_sub(started.elapsed()).min(ceiling);
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

impl ILogicAdapter for ClosestMatch {
    fn name(&self) -> &str {
        "closest-match"
    }

    fn can_process(&self, _input: &Statement) -> bool {
        match &self.storage {
            Some(storage) => storage.count().map(|count| count > 0).unwrap_or(false),
            None => false,
        }
    }

    fn process(&self, input: &Statement) -> BanterResult<ScoredStatement> {
        let storage = self.storage.as_ref().ok_or(BanterError::EmptyDataset)?;

        // Select the closest match to the input statement.
        let matched = self.get(input)?;
        info!(
            input = %input.text(),
            statement = %matched.statement.text(),
            "using closest match"
        );

        // Persist the match so repeated conversations reinforce it.
        storage.update(&matched.statement)?;

        // Everything on record as a reply to the match.
        let response_list =
            storage.filter(&FilterSpec::InResponseTo(matched.statement.text().to_string()))?;

        if response_list.is_empty() {
            info!(
                statement = %matched.statement.text(),
                "no known responses, choosing a random statement"
            );
            let random = storage.get_random()?;
            return Ok(ScoredStatement::new(Confidence::ZERO, random));
        }

        info!(count = response_list.len(), "selecting among known responses");
        let response = select_response(
            &response_list,
            self.config.selection,
            matched.statement.text(),
        )?;
        debug!(response = %response.text(), "response selected");

        Ok(ScoredStatement::new(matched.confidence, response))
    }
}
