pub mod logic;
pub mod storage;

pub use logic::{ILogicAdapter, ScoredStatement};
pub use storage::{FilterSpec, IStatementStorage};
