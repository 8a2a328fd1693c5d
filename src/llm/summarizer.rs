//! Natural-language summaries of structured query results

use crate::core::error::Result;
use crate::llm::client::LanguageModel;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a Kubernetes assistant. Given the following structured data, \
summarize it in clear, user-friendly natural language. \
Include container names and images in your summary. \
If the list is empty, say 'No resources found.'";

/// Ask the language collaborator to summarize a JSON payload
///
/// The reply is returned verbatim; collaborator failures are not retried.
pub async fn summarize(model: &dyn LanguageModel, payload_json: &str) -> Result<String> {
    let user_prompt = format!("Data:\n{}", payload_json);
    model.complete(SUMMARY_SYSTEM_PROMPT, &user_prompt).await
}
