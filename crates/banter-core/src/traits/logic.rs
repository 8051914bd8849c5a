use crate::conversation::{Confidence, Statement};
use crate::errors::BanterResult;

/// A candidate response paired with the confidence of the match that
/// produced it.
#[derive(Debug, Clone)]
pub struct ScoredStatement {
    pub confidence: Confidence,
    pub statement: Statement,
}

impl ScoredStatement {
    pub fn new(confidence: Confidence, statement: Statement) -> Self {
        Self {
            confidence,
            statement,
        }
    }
}

/// Strategy for producing a response to an input statement.
///
/// Adapters are consulted in registration order; the first whose
/// [`can_process`](ILogicAdapter::can_process) returns true handles the
/// input. `can_process` must stay cheap (a count query at most) because it
/// runs on every request.
pub trait ILogicAdapter: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Whether this adapter can currently produce a response.
    fn can_process(&self, input: &Statement) -> bool;

    /// Produce a response to the input.
    fn process(&self, input: &Statement) -> BanterResult<ScoredStatement>;
}
