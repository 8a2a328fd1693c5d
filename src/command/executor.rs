//! Command execution - routes recognized intents to their handlers

use crate::command::registry::CommandRegistry;
use crate::core::error::{KubeAiError, Result};
use crate::core::types::{Intent, QueryResult};

/// Executes intents against a frozen [`CommandRegistry`]
pub struct CommandExecutor {
    registry: CommandRegistry,
}

impl CommandExecutor {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Execute `intent` with its registered handler
    ///
    /// # Errors
    /// * `UnimplementedIntent` when nothing is registered under the name; no
    ///   handler runs
    /// * `Execution` wrapping any validation or cluster failure the handler
    ///   raised, with the intent name and the original message
    /// * anything else (e.g. `Configuration`) unchanged
    pub async fn execute(&self, intent: &Intent) -> Result<QueryResult> {
        let handler = self
            .registry
            .get(&intent.name)
            .ok_or_else(|| KubeAiError::UnimplementedIntent(intent.name.clone()))?;

        tracing::debug!(intent = %intent.name, entities = intent.entities.len(), "Dispatching");

        match handler.handle(&intent.entities).await {
            Ok(result) => {
                tracing::debug!(intent = %intent.name, records = result.len(), "Handler finished");
                Ok(result)
            }
            Err(err) if err.is_handler_failure() => Err(KubeAiError::Execution {
                intent: intent.name.clone(),
                message: err.to_string(),
            }),
            Err(err) => Err(err),
        }
    }
}
