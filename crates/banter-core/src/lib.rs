//! # banter-core
//!
//! Foundation crate for the banter conversational engine.
//! Defines the statement/response model, the storage and logic adapter
//! traits, errors, and configuration. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod conversation;
pub mod errors;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::BanterConfig;
pub use conversation::{Confidence, ResponseLink, Statement};
pub use errors::{BanterError, BanterResult};
pub use traits::{FilterSpec, ILogicAdapter, IStatementStorage, ScoredStatement};
