//! In-memory statement storage for tests and ephemeral bots.
//!
//! A BTreeMap keyed by statement text, so listing order is deterministic.
//! Nothing survives the process.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::seq::IteratorRandom;
use tracing::debug;

use banter_core::conversation::Statement;
use banter_core::errors::{BanterError, BanterResult};
use banter_core::traits::{FilterSpec, IStatementStorage};

use crate::to_storage_err;

type StatementMap = BTreeMap<String, Statement>;

#[derive(Default)]
pub struct InMemoryStorage {
    statements: RwLock<StatementMap>,
    read_only: bool,
}

impl InMemoryStorage {
    /// Create an empty writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that drops every mutation.
    pub fn read_only() -> Self {
        Self {
            statements: RwLock::new(BTreeMap::new()),
            read_only: true,
        }
    }

    fn read(&self) -> BanterResult<RwLockReadGuard<'_, StatementMap>> {
        self.statements
            .read()
            .map_err(|_| to_storage_err("statement map lock poisoned"))
    }

    fn write(&self) -> BanterResult<RwLockWriteGuard<'_, StatementMap>> {
        self.statements
            .write()
            .map_err(|_| to_storage_err("statement map lock poisoned"))
    }
}

impl IStatementStorage for InMemoryStorage {
    fn count(&self) -> BanterResult<usize> {
        Ok(self.read()?.len())
    }

    fn find(&self, text: &str) -> BanterResult<Option<Statement>> {
        Ok(self.read()?.get(text).cloned())
    }

    fn filter(&self, spec: &FilterSpec) -> BanterResult<Vec<Statement>> {
        let map = self.read()?;
        let matches = match spec {
            FilterSpec::All => map.values().cloned().collect(),
            FilterSpec::ByText(text) => map.get(text).cloned().into_iter().collect(),
            FilterSpec::InResponseTo(prompt) => map
                .values()
                .filter(|statement| statement.responds_to(prompt))
                .cloned()
                .collect(),
        };
        Ok(matches)
    }

    fn update(&self, statement: &Statement) -> BanterResult<()> {
        if self.read_only {
            debug!(text = %statement.text(), "read-only storage, dropping update");
            return Ok(());
        }

        let mut map = self.write()?;

        // Merge: incoming links replace the stored occurrence, stored links
        // missing from the incoming statement survive.
        let mut merged = statement.clone();
        if let Some(existing) = map.get(statement.text()) {
            for link in existing.in_response_to() {
                if !merged.responds_to(link.text()) {
                    merged.upsert_response(link.clone());
                }
            }
        }

        // Every referenced prompt becomes a statement of its own.
        let prompts: Vec<String> = merged
            .in_response_to()
            .iter()
            .map(|link| link.text().to_string())
            .collect();
        for prompt in prompts {
            if !map.contains_key(&prompt) {
                map.insert(prompt.clone(), Statement::new(&prompt));
            }
        }

        map.insert(merged.text().to_string(), merged);
        Ok(())
    }

    fn get_random(&self) -> BanterResult<Statement> {
        let map = self.read()?;
        map.values()
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(BanterError::EmptyDataset)
    }

    fn get_response_statements(&self) -> BanterResult<Vec<Statement>> {
        let map = self.read()?;

        let mut prompts = BTreeSet::new();
        for statement in map.values() {
            for link in statement.in_response_to() {
                prompts.insert(link.text().to_string());
            }
        }

        Ok(map
            .values()
            .filter(|statement| prompts.contains(statement.text()))
            .cloned()
            .collect())
    }

    fn remove(&self, text: &str) -> BanterResult<()> {
        if self.read_only {
            debug!(text = %text, "read-only storage, dropping remove");
            return Ok(());
        }
        let mut map = self.write()?;
        map.remove(text);
        for statement in map.values_mut() {
            statement.remove_response(text);
        }
        Ok(())
    }

    fn drop_all(&self) -> BanterResult<()> {
        if self.read_only {
            debug!("read-only storage, dropping drop_all");
            return Ok(());
        }
        self.write()?.clear();
        Ok(())
    }
}
