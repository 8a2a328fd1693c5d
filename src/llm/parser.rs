//! Parse natural language queries into structured intents
//!
//! The language collaborator is asked for a JSON object of the form
//! `{"intent": ..., "entities": [{"type": ..., "value": ...}]}`. Replies are
//! taken as they come: nothing is retried or repaired locally.

use crate::core::error::{KubeAiError, Result};
use crate::core::types::Intent;
use crate::llm::client::LanguageModel;

/// Parse a natural language query into an [`Intent`]
///
/// # Arguments
/// * `model` - The language collaborator
/// * `input` - The user's query
/// * `supported_intents` - Intent names the collaborator may choose from
///
/// # Errors
/// * `NoStructuredPayload` if the reply holds no `{ ... }` span
/// * `ShapeMismatch` if the span is not a well-formed intent
/// * whatever the collaborator itself reports, unmodified
pub async fn parse_intent(
    model: &dyn LanguageModel,
    input: &str,
    supported_intents: &[&str],
) -> Result<Intent> {
    let system_prompt = build_system_prompt(supported_intents);
    let user_prompt = format!("User query: '{}'", input);

    let response = model.complete(&system_prompt, &user_prompt).await?;
    let json_str = extract_json(&response)?;

    let intent: Intent = serde_json::from_str(json_str)
        .map_err(|e| KubeAiError::ShapeMismatch(format!("{} - Response: {}", e, response)))?;

    tracing::debug!(intent = %intent.name, entities = intent.entities.len(), "Recognized intent");
    Ok(intent)
}

/// Extract JSON object from LLM response (handles surrounding text)
pub(crate) fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| KubeAiError::NoStructuredPayload(response.to_string()))?;
    let end = response
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| KubeAiError::NoStructuredPayload(response.to_string()))?;
    Ok(&response[start..=end])
}

fn build_system_prompt(supported_intents: &[&str]) -> String {
    let names = supported_intents
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}\n\nOnly use the following supported intent names: {}.\n{}",
        PARSE_PREAMBLE, names, PARSE_EXAMPLES
    )
}

const PARSE_PREAMBLE: &str = r#"You are an intent recognition engine for a Kubernetes CLI.
Given a user query, extract the intent and entities.
Return a JSON object with:
'intent': <intent_name>, 'entities': [ { 'type': <entity_type>, 'value': <entity_value> }, ... ]"#;

const PARSE_EXAMPLES: &str = r#"If the user asks to list, show, or get pods and their status, use intent: 'get_pod_status'.
If the user asks about pod images, container images, or what images are running, use intent: 'get_pod_images'.

Examples:
User query: 'List all pods'
Response: {"intent": "get_pod_status", "entities": [{"type": "resource_type", "value": "pods"}]}
User query: 'Show pods in default namespace'
Response: {"intent": "get_pod_status", "entities": [{"type": "namespace", "value": "default"}]}
User query: 'Get pod images'
Response: {"intent": "get_pod_images", "entities": [{"type": "resource_type", "value": "pods"}]}
User query: 'What images are the pods using in the default namespace?'
Response: {"intent": "get_pod_images", "entities": [{"type": "namespace", "value": "default"}]}
User query: 'Which container images are running?'
Response: {"intent": "get_pod_images", "entities": [{"type": "resource_type", "value": "pods"}]}
"#;
