//! ConversationEngine: adapter dispatch, learning, and training.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use banter_core::config::BanterConfig;
use banter_core::conversation::{ResponseLink, Statement};
use banter_core::errors::{BanterError, BanterResult};
use banter_core::traits::{ILogicAdapter, IStatementStorage, ScoredStatement};
use banter_match::{ClosestMatch, RandomFallback};
use banter_storage::{InMemoryStorage, SqliteStorage};

/// The top-level conversational engine.
///
/// Construction is explicit dependency injection: exactly one storage
/// collaborator and an ordered adapter chain, fixed at build time. The
/// first adapter whose `can_process` returns true answers each input.
pub struct ConversationEngine {
    storage: Arc<dyn IStatementStorage>,
    adapters: Vec<Box<dyn ILogicAdapter>>,
}

impl ConversationEngine {
    pub fn new(
        storage: Arc<dyn IStatementStorage>,
        adapters: Vec<Box<dyn ILogicAdapter>>,
    ) -> Self {
        Self { storage, adapters }
    }

    /// The standard chain: closest match first, random fallback last.
    pub fn with_defaults(storage: Arc<dyn IStatementStorage>) -> Self {
        let adapters: Vec<Box<dyn ILogicAdapter>> = vec![
            Box::new(ClosestMatch::new(storage.clone())),
            Box::new(RandomFallback::new(storage.clone())),
        ];
        Self::new(storage, adapters)
    }

    /// Build storage and the standard adapter chain from configuration.
    pub fn from_config(config: &BanterConfig) -> BanterResult<Self> {
        let storage: Arc<dyn IStatementStorage> = match &config.storage.db_path {
            Some(path) => Arc::new(SqliteStorage::open_with(path, &config.storage)?),
            None if config.storage.read_only => Arc::new(InMemoryStorage::read_only()),
            None => Arc::new(InMemoryStorage::new()),
        };
        let adapters: Vec<Box<dyn ILogicAdapter>> = vec![
            Box::new(ClosestMatch::with_config(
                storage.clone(),
                config.matching.clone(),
            )),
            Box::new(RandomFallback::new(storage.clone())),
        ];
        Ok(Self::new(storage, adapters))
    }

    /// Answer the input through the first willing adapter.
    pub fn respond(&self, text: &str) -> BanterResult<ScoredStatement> {
        let input = Statement::new(text);
        for adapter in &self.adapters {
            if adapter.can_process(&input) {
                debug!(adapter = adapter.name(), input = %input.text(), "dispatching input");
                return adapter.process(&input);
            }
        }
        Err(BanterError::EmptyDataset)
    }

    /// Answer the input and serialize the chosen statement to its record
    /// shape.
    pub fn get_response(&self, text: &str) -> BanterResult<Value> {
        let answer = self.respond(text)?;
        info!(
            input = text,
            response = %answer.statement.text(),
            confidence = %answer.confidence,
            "response ready"
        );
        Ok(answer.statement.serialize())
    }

    /// Record one observation of `reply_text` answering `prompt_text`.
    pub fn learn(&self, reply_text: &str, prompt_text: &str) -> BanterResult<()> {
        let mut reply = self
            .storage
            .find(reply_text)?
            .unwrap_or_else(|| Statement::new(reply_text));
        // add_response pre-increments in memory; update persists the final
        // count with replace semantics.
        reply.add_response(ResponseLink::new(prompt_text));
        self.storage.update(&reply)
    }

    /// Chain a conversation: each statement is learned as a reply to its
    /// predecessor. A single statement is upserted with no links.
    pub fn train(&self, conversation: &[&str]) -> BanterResult<()> {
        let Some(first) = conversation.first() else {
            return Ok(());
        };
        if self.storage.find(first)?.is_none() {
            self.storage.update(&Statement::new(*first))?;
        }
        for pair in conversation.windows(2) {
            self.learn(pair[1], pair[0])?;
        }
        info!(statements = conversation.len(), "training pass complete");
        Ok(())
    }

    /// The storage collaborator, shared with the adapters.
    pub fn storage(&self) -> &Arc<dyn IStatementStorage> {
        &self.storage
    }
}
