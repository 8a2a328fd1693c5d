//! Intent name -> handler lookup
//!
//! A registry is assembled once with [`RegistryBuilder`] and is read-only
//! afterwards. Supporting a new intent means registering one more handler;
//! dispatch itself never changes.

use crate::cluster::ClusterConnector;
use crate::command::handlers::{PodImagesHandler, PodStatusHandler};
use crate::core::error::Result;
use crate::core::types::{Entity, QueryResult};
use ahash::AHashMap;
use async_trait::async_trait;
use std::sync::Arc;

pub const GET_POD_STATUS: &str = "get_pod_status";
pub const GET_POD_IMAGES: &str = "get_pod_images";

/// Turns an intent's entities into typed query results
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, entities: &[Entity]) -> Result<QueryResult>;
}

/// Immutable mapping from intent name to handler
pub struct CommandRegistry {
    handlers: AHashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with every built-in handler, sharing one connector
    pub fn with_default_handlers(connector: Arc<dyn ClusterConnector>) -> Self {
        Self::builder()
            .register(GET_POD_STATUS, PodStatusHandler::new(connector.clone()))
            .register(GET_POD_IMAGES, PodImagesHandler::new(connector))
            .build()
    }

    pub fn get(&self, intent: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(intent).cloned()
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.handlers.contains_key(intent)
    }

    /// Registered intent names, sorted
    pub fn intents(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Collects handlers before freezing them into a [`CommandRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: AHashMap<String, Arc<dyn CommandHandler>>,
}

impl RegistryBuilder {
    /// Register `handler` for `intent`, replacing any earlier registration
    pub fn register<H>(mut self, intent: impl Into<String>, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        let intent = intent.into();
        if self.handlers.insert(intent.clone(), Arc::new(handler)).is_some() {
            tracing::warn!(%intent, "Handler registered twice; keeping the later one");
        }
        self
    }

    pub fn build(self) -> CommandRegistry {
        tracing::debug!(handlers = self.handlers.len(), "Command registry built");
        CommandRegistry {
            handlers: self.handlers,
        }
    }
}
