//! # banter-storage
//!
//! Statement persistence backends: a durable SQLite engine and an
//! in-memory map for tests and ephemeral bots. Both implement
//! [`banter_core::traits::IStatementStorage`], and callers are expected to
//! hold whichever one they use behind that trait.

pub mod engine;
pub mod in_memory;

mod queries;
mod schema;

pub use engine::SqliteStorage;
pub use in_memory::InMemoryStorage;

use banter_core::errors::BanterError;

/// Wrap a backend failure message in the shared storage error variant.
pub(crate) fn to_storage_err(message: impl Into<String>) -> BanterError {
    BanterError::Storage {
        message: message.into(),
    }
}
