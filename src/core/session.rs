//! Conversation bookkeeping for an interactive session
//!
//! The pipeline never reads this back; it exists so the interactive loop can
//! keep (and later export) a record of what was asked and answered.

use crate::core::types::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user turn, whatever its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub query: String,
    pub intent: Option<String>,
    pub entities: Vec<Entity>,
    pub response: Option<String>,
    pub error: Option<String>,
}

/// Session identity plus its interaction history, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: String,
    pub history: Vec<Interaction>,
}

impl ConversationState {
    /// Start a fresh session with a random id
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            history: Vec::new(),
        }
    }

    pub fn record(&mut self, interaction: Interaction) {
        self.history.push(interaction);
    }

    pub fn last(&self) -> Option<&Interaction> {
        self.history.last()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
