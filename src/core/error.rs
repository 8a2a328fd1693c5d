use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeAiError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("No structured payload found in response: {0}")]
    NoStructuredPayload(String),

    #[error("Shape mismatch in structured payload: {0}")]
    ShapeMismatch(String),

    #[error("No handler implemented for intent: {0}")]
    UnimplementedIntent(String),

    #[error("Cluster API error: {0}")]
    Cluster(String),

    #[error("Failed to execute command for intent '{intent}': {message}")]
    Execution { intent: String, message: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The three failure families callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A collaborator could not be initialized
    Configuration,
    /// Missing parameter or structurally invalid collaborator reply
    Validation,
    /// No handler, or a collaborator call failed
    Execution,
}

impl KubeAiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KubeAiError::Configuration(_) => ErrorKind::Configuration,
            KubeAiError::MissingParameter(_)
            | KubeAiError::NoStructuredPayload(_)
            | KubeAiError::ShapeMismatch(_) => ErrorKind::Validation,
            KubeAiError::UnimplementedIntent(_)
            | KubeAiError::Cluster(_)
            | KubeAiError::Execution { .. }
            | KubeAiError::Llm(_)
            | KubeAiError::Io(_)
            | KubeAiError::Serialization(_) => ErrorKind::Execution,
        }
    }

    /// Failures a handler can raise that dispatch folds into `Execution`.
    pub(crate) fn is_handler_failure(&self) -> bool {
        matches!(
            self,
            KubeAiError::MissingParameter(_)
                | KubeAiError::NoStructuredPayload(_)
                | KubeAiError::ShapeMismatch(_)
                | KubeAiError::Cluster(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, KubeAiError>;
