//! Resolve a handler's required parameters from recognized entities

use crate::core::error::{KubeAiError, Result};
use crate::core::types::Entity;
use ahash::AHashMap;

/// Parameter that falls back to [`DEFAULT_NAMESPACE`] instead of failing
pub const NAMESPACE: &str = "namespace";

pub const DEFAULT_NAMESPACE: &str = "default";

/// Resolved parameter values, keyed by parameter name
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: AHashMap<String, String>,
}

impl Parameters {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a parameter that was listed as required
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| KubeAiError::MissingParameter(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolve `required` parameter names against `entities`
///
/// When several entities share a type, the last one wins. A missing
/// `namespace` resolves to `"default"`; any other missing parameter fails
/// with `MissingParameter` naming it. Parameters are checked in order, so the
/// first missing one is reported.
pub fn extract_parameters(entities: &[Entity], required: &[&str]) -> Result<Parameters> {
    let mut by_type: AHashMap<&str, &str> = AHashMap::with_capacity(entities.len());
    for entity in entities {
        by_type.insert(entity.kind.as_str(), entity.value.as_str());
    }

    let mut values = AHashMap::with_capacity(required.len());
    for &name in required {
        let value = match by_type.get(name) {
            Some(&value) => value,
            None if name == NAMESPACE => DEFAULT_NAMESPACE,
            None => return Err(KubeAiError::MissingParameter(name.to_string())),
        };
        values.insert(name.to_string(), value.to_string());
    }

    Ok(Parameters { values })
}
