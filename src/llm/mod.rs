//! Language collaborator: intent recognition and result summarization
//!
//! The LLM only translates between text and structure. It never decides what
//! is queried against the cluster; that is the command registry's job.

pub mod client;
pub mod parser;
pub mod summarizer;

pub use client::{LanguageModel, LlmClient};
pub use parser::parse_intent;
pub use summarizer::summarize;
