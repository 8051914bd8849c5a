//! Last-resort adapter: any statement beats silence.

use std::sync::Arc;

use tracing::info;

use banter_core::conversation::{Confidence, Statement};
use banter_core::errors::{BanterError, BanterResult};
use banter_core::traits::{ILogicAdapter, IStatementStorage, ScoredStatement};

/// Returns a uniformly random statement at zero confidence.
///
/// Zero, not full, confidence: the answer is arbitrary and downstream
/// consumers must be able to tell. Meant to sit last in the adapter chain.
pub struct RandomFallback {
    storage: Option<Arc<dyn IStatementStorage>>,
}

impl RandomFallback {
    pub fn new(storage: Arc<dyn IStatementStorage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// An adapter with no storage collaborator attached yet.
    pub fn detached() -> Self {
        Self { storage: None }
    }

    pub fn set_storage(&mut self, storage: Arc<dyn IStatementStorage>) {
        self.storage = Some(storage);
    }
}

impl ILogicAdapter for RandomFallback {
    fn name(&self) -> &str {
        "random-fallback"
    }

    fn can_process(&self, _input: &Statement) -> bool {
        match &self.storage {
            Some(storage) => storage.count().map(|count| count > 0).unwrap_or(false),
            None => false,
        }
    }

    fn process(&self, _input: &Statement) -> BanterResult<ScoredStatement> {
        let storage = self.storage.as_ref().ok_or(BanterError::EmptyDataset)?;
        let random = storage.get_random()?;
        info!(response = %random.text(), "falling back to a random statement");
        Ok(ScoredStatement::new(Confidence::ZERO, random))
    }
}
