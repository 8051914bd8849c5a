//! # banter-engine
//!
//! The conversational surface: owns a storage collaborator and an ordered
//! chain of logic adapters, answers inputs through the first willing
//! adapter, and learns new statement/response pairs.

pub mod engine;

pub use engine::ConversationEngine;
