//! Core data carriers: recognized intents and typed query results

use serde::{Deserialize, Serialize};

/// A typed fact extracted from user input (e.g. `namespace` = `prod`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Entity {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// What the user asked for, plus the entities that parameterize it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "intent")]
    pub name: String,
    pub entities: Vec<Entity>,
}

impl Intent {
    pub fn new(name: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            name: name.into(),
            entities,
        }
    }
}

/// A container and the image it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerImage {
    pub name: String,
    pub image: String,
}

/// Status summary for one pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodStatusRecord {
    pub name: String,
    pub namespace: String,
    /// Pod phase (`Running`, `Pending`, ...)
    pub status: String,
    /// Sum of restart counts over every reported container status
    pub restarts: u64,
    /// Spec order; empty when the pod reports no container statuses
    pub containers: Vec<ContainerImage>,
}

/// Images used by one pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodImageRecord {
    pub name: String,
    pub namespace: String,
    pub containers: Vec<ContainerImage>,
}

/// Ordered results of one handler invocation, tagged with their kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    PodStatus(Vec<PodStatusRecord>),
    PodImages(Vec<PodImageRecord>),
}

impl QueryResult {
    pub fn len(&self) -> usize {
        match self {
            QueryResult::PodStatus(records) => records.len(),
            QueryResult::PodImages(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
