//! One user turn, end to end
//!
//! text -> intent (language collaborator) -> executor -> composed reply.
//! Each stage's failure ends the turn; nothing is retried. Every turn is
//! appended to the session history whatever its outcome.

use crate::command::{compose_response, CommandExecutor};
use crate::core::error::KubeAiError;
use crate::core::session::{ConversationState, Interaction};
use crate::core::types::Intent;
use crate::llm::client::LanguageModel;
use crate::llm::parser::parse_intent;
use std::fmt;
use std::sync::Arc;

/// Pipeline stage a turn failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Recognition,
    Execution,
    Response,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Recognition => write!(f, "recognition"),
            Stage::Execution => write!(f, "execution"),
            Stage::Response => write!(f, "response"),
        }
    }
}

/// A completed turn
#[derive(Debug, Clone)]
pub struct Turn {
    pub intent: Intent,
    pub response: String,
}

/// A failed turn; `intent` is set once recognition succeeded
#[derive(Debug)]
pub struct TurnError {
    pub stage: Stage,
    pub intent: Option<Intent>,
    pub error: KubeAiError,
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.error)
    }
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Drives turns for one session
pub struct Assistant {
    model: Arc<dyn LanguageModel>,
    executor: CommandExecutor,
    session: ConversationState,
}

impl Assistant {
    pub fn new(model: Arc<dyn LanguageModel>, executor: CommandExecutor) -> Self {
        Self::with_session(model, executor, ConversationState::new())
    }

    pub fn with_session(
        model: Arc<dyn LanguageModel>,
        executor: CommandExecutor,
        session: ConversationState,
    ) -> Self {
        Self {
            model,
            executor,
            session,
        }
    }

    pub fn session(&self) -> &ConversationState {
        &self.session
    }

    /// Run a whole turn and record it in the session.
    ///
    /// `on_recognized` sees the intent before it is executed.
    pub async fn handle<F>(&mut self, input: &str, on_recognized: F) -> Result<Turn, TurnError>
    where
        F: FnOnce(&Intent),
    {
        let outcome = match self.recognize(input).await {
            Ok(intent) => {
                on_recognized(&intent);
                self.respond(intent).await
            }
            Err(err) => Err(err),
        };
        self.record(input, &outcome);
        outcome
    }

    async fn recognize(&self, input: &str) -> Result<Intent, TurnError> {
        let intents = self.executor.registry().intents();
        parse_intent(self.model.as_ref(), input, &intents)
            .await
            .map_err(|error| TurnError {
                stage: Stage::Recognition,
                intent: None,
                error,
            })
    }

    /// Execute an already recognized intent and compose the reply
    async fn respond(&self, intent: Intent) -> Result<Turn, TurnError> {
        let result = match self.executor.execute(&intent).await {
            Ok(result) => result,
            Err(error) => {
                return Err(TurnError {
                    stage: Stage::Execution,
                    intent: Some(intent),
                    error,
                })
            }
        };

        match compose_response(self.model.as_ref(), &result).await {
            Ok(response) => Ok(Turn { intent, response }),
            Err(error) => Err(TurnError {
                stage: Stage::Response,
                intent: Some(intent),
                error,
            }),
        }
    }

    fn record(&mut self, input: &str, outcome: &Result<Turn, TurnError>) {
        let interaction = match outcome {
            Ok(turn) => Interaction {
                query: input.to_string(),
                intent: Some(turn.intent.name.clone()),
                entities: turn.intent.entities.clone(),
                response: Some(turn.response.clone()),
                error: None,
            },
            Err(err) => Interaction {
                query: input.to_string(),
                intent: err.intent.as_ref().map(|i| i.name.clone()),
                entities: err
                    .intent
                    .as_ref()
                    .map(|i| i.entities.clone())
                    .unwrap_or_default(),
                response: None,
                error: Some(err.error.to_string()),
            },
        };
        self.session.record(interaction);
    }
}
