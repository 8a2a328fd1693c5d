//! KubeAI - natural language queries against a Kubernetes cluster

pub mod assistant;
pub mod cluster;
pub mod command;
pub mod core;
pub mod llm;
