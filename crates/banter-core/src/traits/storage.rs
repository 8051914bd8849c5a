use crate::conversation::Statement;
use crate::errors::BanterResult;

/// Criteria accepted by [`IStatementStorage::filter`].
///
/// A closed enum rather than free-form field/value pairs: every backend
/// supports exactly these queries and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// Every stored statement.
    All,
    /// Statements whose text equals the given string exactly.
    ByText(String),
    /// Statements recorded as responses to the given prompt text.
    InResponseTo(String),
}

/// Statement persistence contract. Both the SQLite and the in-memory
/// backend implement this, and the engine only ever talks through it.
pub trait IStatementStorage: Send + Sync {
    /// Number of statements currently stored.
    fn count(&self) -> BanterResult<usize>;

    /// Look up a single statement by exact text.
    fn find(&self, text: &str) -> BanterResult<Option<Statement>>;

    /// All statements matching the given filter, in a stable order.
    fn filter(&self, spec: &FilterSpec) -> BanterResult<Vec<Statement>>;

    /// Insert or merge a statement.
    ///
    /// Response links carried by `statement` replace the stored occurrence
    /// for the same prompt text; stored links absent from `statement` are
    /// kept. Every referenced prompt is upserted as a statement of its own
    /// so the response graph never dangles. Read-only backends silently
    /// ignore the call.
    fn update(&self, statement: &Statement) -> BanterResult<()>;

    /// A uniformly random statement. Fails with
    /// [`BanterError::EmptyDataset`](crate::errors::BanterError::EmptyDataset)
    /// when nothing is stored.
    fn get_random(&self) -> BanterResult<Statement>;

    /// Statements that have at least one recorded reply, i.e. statements
    /// somebody is known to have responded to. These are the only valid
    /// match targets for response selection.
    fn get_response_statements(&self) -> BanterResult<Vec<Statement>>;

    /// Delete a statement and every link that references it, from either
    /// endpoint. Read-only backends silently ignore the call.
    fn remove(&self, text: &str) -> BanterResult<()>;

    /// Delete everything. Read-only backends silently ignore the call.
    fn drop_all(&self) -> BanterResult<()>;
}
